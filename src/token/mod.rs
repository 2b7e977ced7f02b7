//! Token layer: fetches the bearer token from `POST /token` and caches it.

mod cache;
mod config;

use std::fmt;
use std::sync::Arc;

pub use cache::TokenCache;
pub use config::{Config, TOKEN_TTL};

use crate::client::SmsIrError;
use crate::domain::Token;
use crate::http::{self, BoxFuture, HttpRequest, HttpTransport, ReqwestTransport};
use crate::transport::{TOKEN_PATH, decode_token_response, encode_token_body};

/// Capability to produce a token for authenticated sms.ir requests.
///
/// [`TokenProvider`] is the HTTP-backed implementation; [`StaticTokenSource`] always
/// returns the same token and is meant for tests.
pub trait TokenSource: Send + Sync {
    fn token(&self) -> BoxFuture<'_, Result<Token, SmsIrError>>;
}

#[derive(Clone)]
/// Fetches tokens from sms.ir and reuses them until they are [`TOKEN_TTL`] old.
///
/// Concurrent callers that miss the cache wait for a single in-flight refresh and
/// share its result. With [`Config::disable_cache`] every call performs its own
/// request, one at a time.
pub struct TokenProvider {
    base_url: String,
    config: Config,
    cache: Arc<TokenCache>,
    http: Arc<dyn HttpTransport>,
}

impl TokenProvider {
    /// Create a provider with its own [`TokenCache`].
    pub fn new(config: Config) -> Result<Self, SmsIrError> {
        Self::with_cache(config, Arc::new(TokenCache::new()))
    }

    /// Create a provider that reads and refreshes a shared `cache`.
    pub fn with_cache(config: Config, cache: Arc<TokenCache>) -> Result<Self, SmsIrError> {
        let http = ReqwestTransport::build(config.timeout, config.user_agent.as_deref())?;
        Self::from_parts(config, cache, Arc::new(http))
    }

    pub(crate) fn from_parts(
        config: Config,
        cache: Arc<TokenCache>,
        http: Arc<dyn HttpTransport>,
    ) -> Result<Self, SmsIrError> {
        Ok(Self {
            base_url: http::resolve_base_url(&config.base_url)?,
            config,
            cache,
            http,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolved base URL the `/token` path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cache(&self) -> &Arc<TokenCache> {
        &self.cache
    }

    /// Return a current token, asking the server only when the cache is stale,
    /// empty, or disabled.
    ///
    /// Errors:
    /// - [`SmsIrError::Authentication`] when the server rejects the key pair,
    /// - [`SmsIrError::Transport`], [`SmsIrError::Parse`] or [`SmsIrError::HttpStatus`]
    ///   when the exchange itself fails.
    ///
    /// The cache is only written on success.
    pub async fn get(&self) -> Result<Token, SmsIrError> {
        if let Some(token) = self.cached() {
            tracing::trace!("using cached sms.ir token");
            return Ok(token);
        }

        let _refresh = self.cache.lock_refresh().await;
        if let Some(token) = self.cached() {
            tracing::trace!("sms.ir token was refreshed by a concurrent caller");
            return Ok(token);
        }

        let request = HttpRequest::post(
            http::endpoint(&self.base_url, TOKEN_PATH),
            encode_token_body(&self.config.api_key, &self.config.secret_key),
        );
        let envelope = http::exchange(self.http.as_ref(), request, decode_token_response).await?;

        if !envelope.is_successful {
            tracing::debug!(server_message = ?envelope.message, "sms.ir rejected the key pair");
            return Err(SmsIrError::Authentication {
                message: envelope.message,
            });
        }

        let token = Token::new(envelope.payload);
        self.cache.store(token.clone());
        tracing::debug!(cache_disabled = self.config.disable_cache, "obtained sms.ir token");
        Ok(token)
    }

    fn cached(&self) -> Option<Token> {
        if self.config.disable_cache {
            return None;
        }
        self.cache.fresh(self.config.token_ttl)
    }
}

impl TokenSource for TokenProvider {
    fn token(&self) -> BoxFuture<'_, Result<Token, SmsIrError>> {
        Box::pin(self.get())
    }
}

impl fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenProvider")
            .field("base_url", &self.base_url)
            .field("config", &self.config)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
/// [`TokenSource`] that always yields the same token without any I/O.
pub struct StaticTokenSource(Token);

impl StaticTokenSource {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Token::new(token))
    }
}

impl TokenSource for StaticTokenSource {
    fn token(&self) -> BoxFuture<'_, Result<Token, SmsIrError>> {
        let token = self.0.clone();
        Box::pin(async move { Ok(token) })
    }
}
