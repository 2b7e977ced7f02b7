use std::time::Duration;

use crate::domain::{ApiKey, SecretKey, ValidationError};

/// Time after which a cached token is considered stale.
pub const TOKEN_TTL: Duration = Duration::from_secs(20 * 60);

#[derive(Debug, Clone)]
/// Settings a [`TokenProvider`](crate::TokenProvider) is built from.
///
/// Only the API key and secret key are required. An empty base URL means
/// [`DEFAULT_BASE_URL`](crate::DEFAULT_BASE_URL).
pub struct Config {
    pub(crate) base_url: String,
    pub(crate) api_key: ApiKey,
    pub(crate) secret_key: SecretKey,
    pub(crate) disable_cache: bool,
    pub(crate) token_ttl: Duration,
    pub(crate) timeout: Option<Duration>,
    pub(crate) user_agent: Option<String>,
}

impl Config {
    /// Create a config for the default endpoint with caching enabled.
    pub fn new(
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            base_url: String::new(),
            api_key: ApiKey::new(api_key)?,
            secret_key: SecretKey::new(secret_key)?,
            disable_cache: false,
            token_ttl: TOKEN_TTL,
            timeout: None,
            user_agent: None,
        })
    }

    /// Override the REST base URL (the `/token` path is appended to it).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// When set, every token request goes to the server.
    pub fn disable_cache(mut self, disable: bool) -> Self {
        self.disable_cache = disable;
        self
    }

    /// Override how long a fetched token is reused. Defaults to [`TOKEN_TTL`].
    pub fn token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Set an HTTP client timeout applied to the entire token request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    pub fn is_cache_disabled(&self) -> bool {
        self.disable_cache
    }

    pub fn ttl(&self) -> Duration {
        self.token_ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_defaults() {
        let config = Config::new("key", "secret").unwrap();
        assert_eq!(config.base_url, "");
        assert!(!config.is_cache_disabled());
        assert_eq!(config.ttl(), Duration::from_secs(1200));
        assert_eq!(config.api_key().as_str(), "key");
        assert_eq!(config.secret_key().expose(), "secret");
    }

    #[test]
    fn new_validates_keys() {
        assert!(matches!(
            Config::new(" ", "secret"),
            Err(ValidationError::Empty {
                field: ApiKey::FIELD
            })
        ));
        assert!(matches!(
            Config::new("key", ""),
            Err(ValidationError::Empty {
                field: SecretKey::FIELD
            })
        ));
    }

    #[test]
    fn setters_are_applied() {
        let config = Config::new("key", "secret")
            .unwrap()
            .base_url("https://example.invalid/api")
            .disable_cache(true)
            .token_ttl(Duration::from_secs(5))
            .timeout(Duration::from_secs(2))
            .user_agent("smsir-tests");

        assert_eq!(config.base_url, "https://example.invalid/api");
        assert!(config.is_cache_disabled());
        assert_eq!(config.ttl(), Duration::from_secs(5));
        assert_eq!(config.timeout, Some(Duration::from_secs(2)));
        assert_eq!(config.user_agent.as_deref(), Some("smsir-tests"));
    }
}
