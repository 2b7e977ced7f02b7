use std::fmt;
use std::time::{Duration, Instant};

use async_lock::{Mutex as AsyncMutex, MutexGuard as AsyncMutexGuard};
use parking_lot::Mutex;

use crate::domain::Token;

#[derive(Debug, Clone)]
struct CachedToken {
    token: Token,
    obtained_at: Instant,
}

/// Last token fetched from the server and the instant it was obtained.
///
/// A [`TokenProvider`](crate::TokenProvider) owns one by default; share an
/// `Arc<TokenCache>` between providers to reuse a token across them. The token and
/// its timestamp are read and replaced together under one lock. Refreshes are
/// serialized by a separate async lock that is held across the network call.
pub struct TokenCache {
    entry: Mutex<Option<CachedToken>>,
    refresh: AsyncMutex<()>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self {
            entry: Mutex::new(None),
            refresh: AsyncMutex::new(()),
        }
    }

    /// Returns the cached token if it was obtained less than `ttl` ago.
    pub fn fresh(&self, ttl: Duration) -> Option<Token> {
        self.entry
            .lock()
            .as_ref()
            .filter(|cached| cached.obtained_at.elapsed() < ttl)
            .map(|cached| cached.token.clone())
    }

    /// Drop the cached token so the next lookup goes to the server.
    pub fn clear(&self) {
        *self.entry.lock() = None;
    }

    pub(crate) fn store(&self, token: Token) {
        *self.entry.lock() = Some(CachedToken {
            token,
            obtained_at: Instant::now(),
        });
    }

    pub(crate) async fn lock_refresh(&self) -> AsyncMutexGuard<'_, ()> {
        self.refresh.lock().await
    }
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TokenCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cached = self.entry.lock().is_some();
        f.debug_struct("TokenCache")
            .field("cached", &cached)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_respects_ttl() {
        let cache = TokenCache::new();
        assert_eq!(cache.fresh(Duration::from_secs(60)), None);

        cache.store(Token::new("one"));
        assert_eq!(
            cache.fresh(Duration::from_secs(60)).map(|t| t.expose().to_owned()),
            Some("one".to_owned())
        );
        assert_eq!(cache.fresh(Duration::ZERO), None);
    }

    #[test]
    fn store_replaces_and_clear_drops() {
        let cache = TokenCache::new();
        cache.store(Token::new("one"));
        cache.store(Token::new("two"));
        assert_eq!(
            cache.fresh(Duration::from_secs(60)),
            Some(Token::new("two"))
        );

        cache.clear();
        assert_eq!(cache.fresh(Duration::from_secs(60)), None);
    }

    #[test]
    fn debug_does_not_print_token() {
        let cache = TokenCache::new();
        cache.store(Token::new("super-secret"));
        let rendered = format!("{cache:?}");
        assert!(rendered.contains("cached: true"));
        assert!(!rendered.contains("super-secret"));
    }
}
