//! Transport layer: JSON request bodies and response envelopes for each endpoint.

mod credit;
mod identifier;
mod send;
mod token;

pub use credit::{CREDIT_PATH, decode_credit_response};
pub use send::{
    ULTRA_FAST_SEND_PATH, VERIFICATION_CODE_PATH, decode_send_response,
    encode_send_by_template_body, encode_send_verification_code_body,
};
pub use token::{TOKEN_PATH, decode_token_response, encode_token_body};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("identifier {raw} cannot be represented as an exact integer")]
    InexactIdentifier { raw: String },
}

/// Decoded response: the success flag, the server message, and the payload.
///
/// The payload is only meaningful when `is_successful` is true.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub is_successful: bool,
    pub message: Option<String>,
    pub payload: T,
}
