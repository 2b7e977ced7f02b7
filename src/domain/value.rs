use std::fmt;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// sms.ir user API key (`UserApiKey`).
///
/// Invariant: non-empty after trimming.
pub struct ApiKey(String);

impl ApiKey {
    /// JSON field name used by sms.ir (`UserApiKey`).
    pub const FIELD: &'static str = "UserApiKey";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// sms.ir secret key (`SecretKey`).
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct SecretKey(String);

impl SecretKey {
    /// JSON field name used by sms.ir (`SecretKey`).
    pub const FIELD: &'static str = "SecretKey";

    /// Create a validated [`SecretKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the secret as provided.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SecretKey").field(&"<redacted>").finish()
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Bearer token returned by `POST /token` and sent as `x-sms-ir-secure-token`.
///
/// `Debug` and `Display` never print the value; use [`Token::expose`] to read it.
pub struct Token(String);

impl Token {
    /// HTTP header carrying the token on authenticated requests.
    pub const HEADER: &'static str = "x-sms-ir-secure-token";

    /// Wrap a raw token string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw token. Callers must avoid logging this string.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Token").field(&"<redacted>").finish()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Recipient mobile number, in the format sms.ir expects (for example `09121234567`).
///
/// Invariant: non-empty after trimming. No further normalization is applied.
pub struct MobileNumber(String);

impl MobileNumber {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "MobileNumber";

    /// Create a validated [`MobileNumber`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated number.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Verification code delivered with the provider's default template (`Code`).
///
/// Invariant: non-empty after trimming.
pub struct VerificationCode(String);

impl VerificationCode {
    /// JSON field name used by sms.ir (`Code`).
    pub const FIELD: &'static str = "Code";

    /// Create a validated [`VerificationCode`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Server-side template identifier (`TemplateId`).
pub struct TemplateId(i64);

impl TemplateId {
    /// JSON field name used by sms.ir (`TemplateId`).
    pub const FIELD: &'static str = "TemplateId";

    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for TemplateId {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Identifier returned by the send endpoints (`VerificationCodeId`).
///
/// `Display` renders the base-10 integer with no fractional part.
pub struct SendId(u64);

impl SendId {
    /// Identifier the provider's own clients report for a rejected send.
    pub const SENTINEL: &'static str = "0";

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
