//! Client layer: obtains a token, calls the sms.ir endpoints, and maps
//! transport ↔ domain.

use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{SendByTemplate, SendId, SendVerificationCode, ValidationError};
use crate::http::{
    self, BoxFuture, DEFAULT_BASE_URL, HttpRequest, HttpTransport, ReqwestTransport,
};
use crate::token::TokenSource;
use crate::transport::{
    CREDIT_PATH, Envelope, TransportError, ULTRA_FAST_SEND_PATH, VERIFICATION_CODE_PATH,
    decode_credit_response, decode_send_response, encode_send_by_template_body,
    encode_send_verification_code_body,
};

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`TokenProvider`](crate::TokenProvider) and [`BulkSmsClient`].
///
/// This error preserves:
/// - API-level rejections (`IsSuccessful == false`), one variant per operation,
/// - HTTP-level failures (transport failures, or non-2xx responses without a JSON body),
/// - validation/parse failures.
pub enum SmsIrError {
    /// `POST /token` rejected the API key / secret key pair.
    #[error("invalid API key or secret key")]
    Authentication { message: Option<String> },

    /// `GET /credit` rejected the token.
    #[error("invalid token")]
    InvalidToken { message: Option<String> },

    /// `POST /VerificationCode` rejected the request, usually the mobile number.
    #[error("invalid mobile")]
    InvalidMobile { message: Option<String> },

    /// `POST /UltraFastSend` rejected the mobile number, template, or parameters.
    #[error("invalid data")]
    InvalidData { message: Option<String> },

    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code with a body that is not a sms.ir envelope.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl SmsIrError {
    /// Server-provided `Message` for API-level rejections.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Authentication { message }
            | Self::InvalidToken { message }
            | Self::InvalidMobile { message }
            | Self::InvalidData { message } => message.as_deref(),
            _ => None,
        }
    }
}

/// Capability to perform the sms.ir business operations.
///
/// [`BulkSmsClient`] is the HTTP-backed implementation. Code that sends messages can
/// depend on `dyn MessagingClient` and swap in a fake under test.
pub trait MessagingClient: Send + Sync {
    /// Remaining account credit.
    fn get_credit(&self) -> BoxFuture<'_, Result<i64, SmsIrError>>;

    /// Send a code with the provider's default verification template.
    fn send_verification_code(
        &self,
        request: SendVerificationCode,
    ) -> BoxFuture<'_, Result<SendId, SmsIrError>>;

    /// Send a message built server-side from a template and parameters.
    fn send_by_template(
        &self,
        request: SendByTemplate,
    ) -> BoxFuture<'_, Result<SendId, SmsIrError>>;
}

#[derive(Clone)]
/// Builder for [`BulkSmsClient`].
///
/// Use this when you need to customize the base URL, timeout, or user-agent.
pub struct BulkSmsClientBuilder {
    tokens: Arc<dyn TokenSource>,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl BulkSmsClientBuilder {
    /// Create a builder with the default base URL and no timeout/user-agent override.
    pub fn new(tokens: Arc<dyn TokenSource>) -> Self {
        Self {
            tokens,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the REST base URL the endpoint paths are appended to.
    /// An empty value selects [`DEFAULT_BASE_URL`].
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`BulkSmsClient`].
    pub fn build(self) -> Result<BulkSmsClient, SmsIrError> {
        let base_url = http::resolve_base_url(&self.base_url)?;
        let http = ReqwestTransport::build(self.timeout, self.user_agent.as_deref())?;

        Ok(BulkSmsClient {
            base_url,
            tokens: self.tokens,
            http: Arc::new(http),
        })
    }
}

#[derive(Clone)]
/// High-level sms.ir client.
///
/// Every call asks the [`TokenSource`] for a token and sends it as
/// `x-sms-ir-secure-token`; caching is entirely up to the token source. By default
/// requests go to `https://restfulsms.com/api`.
pub struct BulkSmsClient {
    base_url: String,
    tokens: Arc<dyn TokenSource>,
    http: Arc<dyn HttpTransport>,
}

impl BulkSmsClient {
    /// Create a client using the default base URL.
    ///
    /// For more customization, use [`BulkSmsClient::builder`].
    pub fn new(tokens: Arc<dyn TokenSource>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            tokens,
            http: Arc::new(ReqwestTransport::default()),
        }
    }

    /// Create a client for `base_url`, which must be absolute (or empty for the default).
    pub fn with_base_url(
        tokens: Arc<dyn TokenSource>,
        base_url: impl Into<String>,
    ) -> Result<Self, SmsIrError> {
        Self::builder(tokens).base_url(base_url).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(tokens: Arc<dyn TokenSource>) -> BulkSmsClientBuilder {
        BulkSmsClientBuilder::new(tokens)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Query the remaining credit on the account (`GET /credit`).
    ///
    /// The provider reports a decimal amount; it is truncated toward zero.
    ///
    /// Errors:
    /// - [`SmsIrError::InvalidToken`] when sms.ir rejects the token,
    /// - [`SmsIrError::Parse`] when the response is not a credit envelope,
    /// - any error of the token source.
    pub async fn get_credit(&self) -> Result<i64, SmsIrError> {
        let request = HttpRequest::get(http::endpoint(&self.base_url, CREDIT_PATH));
        let envelope = self.call(request, decode_credit_response).await?;

        accept(envelope, |message| SmsIrError::InvalidToken { message })
    }

    /// Send a verification code (`POST /VerificationCode`).
    ///
    /// Errors:
    /// - [`SmsIrError::InvalidMobile`] when sms.ir rejects the request,
    /// - [`SmsIrError::Parse`] for malformed responses or identifiers that do not fit
    ///   an exact integer,
    /// - any error of the token source.
    pub async fn send_verification_code(
        &self,
        request: SendVerificationCode,
    ) -> Result<SendId, SmsIrError> {
        let request = HttpRequest::post(
            http::endpoint(&self.base_url, VERIFICATION_CODE_PATH),
            encode_send_verification_code_body(&request),
        );
        let envelope = self.call(request, decode_send_response).await?;

        accept(envelope, |message| SmsIrError::InvalidMobile { message })
    }

    /// Send a templated message (`POST /UltraFastSend`).
    ///
    /// Errors:
    /// - [`SmsIrError::InvalidData`] when sms.ir rejects the mobile number, template,
    ///   or parameters,
    /// - [`SmsIrError::Parse`] for malformed responses,
    /// - any error of the token source.
    pub async fn send_by_template(&self, request: SendByTemplate) -> Result<SendId, SmsIrError> {
        let request = HttpRequest::post(
            http::endpoint(&self.base_url, ULTRA_FAST_SEND_PATH),
            encode_send_by_template_body(&request),
        );
        let envelope = self.call(request, decode_send_response).await?;

        accept(envelope, |message| SmsIrError::InvalidData { message })
    }

    async fn call<T, F>(&self, request: HttpRequest, decode: F) -> Result<Envelope<T>, SmsIrError>
    where
        F: FnOnce(&str) -> Result<Envelope<T>, TransportError>,
    {
        let token = self.tokens.token().await?;
        http::exchange(self.http.as_ref(), request.with_token(&token), decode).await
    }
}

fn accept<T>(
    envelope: Envelope<T>,
    rejected: impl FnOnce(Option<String>) -> SmsIrError,
) -> Result<T, SmsIrError> {
    if envelope.is_successful {
        return Ok(envelope.payload);
    }

    tracing::debug!(server_message = ?envelope.message, "sms.ir rejected the request");
    Err(rejected(envelope.message))
}

impl MessagingClient for BulkSmsClient {
    fn get_credit(&self) -> BoxFuture<'_, Result<i64, SmsIrError>> {
        Box::pin(BulkSmsClient::get_credit(self))
    }

    fn send_verification_code(
        &self,
        request: SendVerificationCode,
    ) -> BoxFuture<'_, Result<SendId, SmsIrError>> {
        Box::pin(BulkSmsClient::send_verification_code(self, request))
    }

    fn send_by_template(
        &self,
        request: SendByTemplate,
    ) -> BoxFuture<'_, Result<SendId, SmsIrError>> {
        Box::pin(BulkSmsClient::send_by_template(self, request))
    }
}
