use serde::Deserialize;
use serde_json::{Value, json};

use super::identifier::TransportIdentifier;
use super::{Envelope, TransportError};
use crate::domain::{SendByTemplate, SendId, SendVerificationCode};

pub const VERIFICATION_CODE_PATH: &str = "VerificationCode";
pub const ULTRA_FAST_SEND_PATH: &str = "UltraFastSend";

/// Response shared by `VerificationCode` and `UltraFastSend`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SendJsonResponse {
    #[serde(default)]
    verification_code_id: Option<TransportIdentifier>,
    #[serde(default)]
    is_successful: bool,
    #[serde(default)]
    message: Option<String>,
}

pub fn encode_send_verification_code_body(request: &SendVerificationCode) -> Value {
    json!({
        "MobileNumber": request.mobile().as_str(),
        "Code": request.code().as_str(),
    })
}

pub fn encode_send_by_template_body(request: &SendByTemplate) -> Value {
    let parameters = request
        .parameter_map()
        .iter()
        .map(|(name, value)| json!({"Parameter": name, "ParameterValue": value}))
        .collect::<Vec<_>>();

    json!({
        "Mobile": request.mobile().as_str(),
        "TemplateId": request.template_id().value(),
        "ParameterArray": parameters,
    })
}

/// Decode a send response. The identifier is only converted for successful
/// responses; a rejected send never fails on a malformed id.
pub fn decode_send_response(json: &str) -> Result<Envelope<SendId>, TransportError> {
    let parsed: SendJsonResponse = serde_json::from_str(json)?;
    let payload = if parsed.is_successful {
        parsed
            .verification_code_id
            .unwrap_or_default()
            .into_u64()
            .map(SendId::new)?
    } else {
        SendId::new(0)
    };

    Ok(Envelope {
        is_successful: parsed.is_successful,
        message: parsed.message,
        payload,
    })
}
