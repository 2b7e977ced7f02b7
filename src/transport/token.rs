use serde::Deserialize;
use serde_json::{Value, json};

use super::{Envelope, TransportError};
use crate::domain::{ApiKey, SecretKey};

pub const TOKEN_PATH: &str = "token";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TokenJsonResponse {
    #[serde(default)]
    token_key: Option<String>,
    #[serde(default)]
    is_successful: bool,
    #[serde(default)]
    message: Option<String>,
}

pub fn encode_token_body(api_key: &ApiKey, secret_key: &SecretKey) -> Value {
    json!({
        "UserApiKey": api_key.as_str(),
        "SecretKey": secret_key.expose(),
    })
}

pub fn decode_token_response(json: &str) -> Result<Envelope<String>, TransportError> {
    let parsed: TokenJsonResponse = serde_json::from_str(json)?;
    Ok(Envelope {
        is_successful: parsed.is_successful,
        message: parsed.message,
        payload: parsed.token_key.unwrap_or_default(),
    })
}
