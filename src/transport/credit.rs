use serde::Deserialize;

use super::{Envelope, TransportError};

pub const CREDIT_PATH: &str = "credit";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CreditJsonResponse {
    #[serde(default)]
    credit: Option<f64>,
    #[serde(default)]
    is_successful: bool,
    #[serde(default)]
    message: Option<String>,
}

/// Decode `GET /credit`. The amount arrives as a JSON number that may carry a
/// fractional part; it is truncated toward zero.
pub fn decode_credit_response(json: &str) -> Result<Envelope<i64>, TransportError> {
    let parsed: CreditJsonResponse = serde_json::from_str(json)?;
    Ok(Envelope {
        is_successful: parsed.is_successful,
        message: parsed.message,
        payload: parsed.credit.map(|credit| credit.trunc() as i64).unwrap_or(0),
    })
}
