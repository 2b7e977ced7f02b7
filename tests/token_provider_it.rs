use std::sync::Arc;

use httpmock::prelude::*;
use serde_json::json;
use smsir::{Config, SmsIrError, TokenCache, TokenProvider};

fn config(server: &MockServer) -> Config {
    Config::new("fake_api_key", "fake_secret_key")
        .expect("Test credentials should be valid.")
        .base_url(server.base_url())
}

#[tokio::test]
async fn token_request_posts_credentials_as_json() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/token")
                .header("content-type", "application/json")
                .json_body(json!({"UserApiKey": "fake_api_key", "SecretKey": "fake_secret_key"}));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"TokenKey": "fake_token", "IsSuccessful": true, "Message": "ok"}));
        })
        .await;
    let provider = TokenProvider::new(config(&server).disable_cache(true))
        .expect("Provider should build for the mock server.");

    let token = provider.get().await.expect("Token request should succeed.");

    assert_eq!(token.expose(), "fake_token");
    mock.assert_async().await;
}

#[tokio::test]
async fn token_is_cached_until_ttl() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/token");
            then.status(200)
                .json_body(json!({"TokenKey": "cached-token", "IsSuccessful": true}));
        })
        .await;
    let provider =
        TokenProvider::new(config(&server)).expect("Provider should build for the mock server.");

    let first = provider.get().await.expect("First token request should succeed.");
    let second = provider.get().await.expect("Cached token lookup should succeed.");

    assert_eq!(first, second);
    mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn providers_sharing_a_cache_fetch_once() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/token");
            then.status(200)
                .json_body(json!({"TokenKey": "shared-token", "IsSuccessful": true}));
        })
        .await;
    let cache = Arc::new(TokenCache::new());
    let first = TokenProvider::with_cache(config(&server), cache.clone())
        .expect("First provider should build.");
    let second =
        TokenProvider::with_cache(config(&server), cache).expect("Second provider should build.");

    let t1 = first.get().await.expect("First provider should fetch a token.");
    let t2 = second.get().await.expect("Second provider should reuse the token.");

    assert_eq!(t1.expose(), "shared-token");
    assert_eq!(t1, t2);
    mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn disabled_cache_requests_every_time() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/token");
            then.status(200)
                .json_body(json!({"TokenKey": "fresh-token", "IsSuccessful": true}));
        })
        .await;
    let provider = TokenProvider::new(config(&server).disable_cache(true))
        .expect("Provider should build for the mock server.");

    for _ in 0..3 {
        provider.get().await.expect("Token request should succeed.");
    }

    mock.assert_calls_async(3).await;
}

#[tokio::test]
async fn invalid_keys_return_authentication_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/token");
            then.status(200).json_body(json!({
                "TokenKey": "",
                "IsSuccessful": false,
                "Message": "invalid user api key"
            }));
        })
        .await;
    let provider = TokenProvider::new(config(&server).disable_cache(true))
        .expect("Provider should build for the mock server.");

    let err = provider.get().await.expect_err("Rejected keys should fail.");

    assert!(matches!(err, SmsIrError::Authentication { .. }));
    assert_eq!(err.to_string(), "invalid API key or secret key");
    assert_eq!(err.server_message(), Some("invalid user api key"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_gets_without_cache_complete_intact() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/token");
            then.status(200)
                .json_body(json!({"TokenKey": "race-token", "IsSuccessful": true}));
        })
        .await;
    let provider = Arc::new(
        TokenProvider::new(config(&server).disable_cache(true))
            .expect("Provider should build for the mock server."),
    );

    let handles = (0..10)
        .map(|_| {
            let provider = provider.clone();
            tokio::spawn(async move { provider.get().await })
        })
        .collect::<Vec<_>>();
    for handle in handles {
        let token = handle
            .await
            .expect("Token task should not panic.")
            .expect("Concurrent token request should succeed.");
        assert_eq!(token.expose(), "race-token");
    }

    mock.assert_calls_async(10).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_gets_with_cache_share_one_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/token");
            then.status(200)
                .json_body(json!({"TokenKey": "singleflight", "IsSuccessful": true}));
        })
        .await;
    let provider = Arc::new(
        TokenProvider::new(config(&server)).expect("Provider should build for the mock server."),
    );

    let handles = (0..10)
        .map(|_| {
            let provider = provider.clone();
            tokio::spawn(async move { provider.get().await })
        })
        .collect::<Vec<_>>();
    for handle in handles {
        let token = handle
            .await
            .expect("Token task should not panic.")
            .expect("Concurrent token request should succeed.");
        assert_eq!(token.expose(), "singleflight");
    }

    mock.assert_calls_async(1).await;
}
