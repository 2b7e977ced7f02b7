use serde::Deserialize;

use super::TransportError;

/// Largest integer an IEEE-754 double represents exactly (2^53).
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Numeric identifier that sms.ir serializes as a JSON number, sometimes with a
/// fractional part (`42.0`).
///
/// Integer tokens are taken as-is. Float tokens are accepted only when they are
/// integral, non-negative, and no larger than 2^53; beyond that the decoded value
/// may already differ from what the server sent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct TransportIdentifier(serde_json::Number);

impl Default for TransportIdentifier {
    fn default() -> Self {
        Self(serde_json::Number::from(0u64))
    }
}

impl TransportIdentifier {
    pub fn into_u64(self) -> Result<u64, TransportError> {
        if let Some(value) = self.0.as_u64() {
            return Ok(value);
        }

        match self.0.as_f64() {
            Some(value)
                if value.is_finite()
                    && value >= 0.0
                    && value.fract() == 0.0
                    && value <= MAX_EXACT_FLOAT =>
            {
                Ok(value as u64)
            }
            _ => Err(TransportError::InexactIdentifier {
                raw: self.0.to_string(),
            }),
        }
    }
}
