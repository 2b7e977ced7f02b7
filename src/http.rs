//! HTTP seam shared by the token provider and the messaging client.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::client::SmsIrError;
use crate::domain::{Token, ValidationError};
use crate::transport::TransportError;

/// Published sms.ir REST endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://restfulsms.com/api";

/// Boxed `Send` future returned by the capability traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub(crate) type BoxError = Box<dyn StdError + Send + Sync>;

const CONTENT_TYPE: &str = "Content-Type";
const APPLICATION_JSON: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HttpMethod {
    Get,
    Post,
}

#[derive(Debug, Clone)]
pub(crate) struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<Value>,
}

impl HttpRequest {
    /// Every sms.ir request is JSON, including the body-less credit query.
    fn json(method: HttpMethod, url: String, body: Option<Value>) -> Self {
        Self {
            method,
            url,
            headers: vec![(CONTENT_TYPE, APPLICATION_JSON.to_owned())],
            body,
        }
    }

    pub fn get(url: String) -> Self {
        Self::json(HttpMethod::Get, url, None)
    }

    pub fn post(url: String, body: Value) -> Self {
        Self::json(HttpMethod::Post, url, Some(body))
    }

    pub fn with_token(mut self, token: &Token) -> Self {
        self.headers.push((Token::HEADER, token.expose().to_owned()));
        self
    }

    #[cfg(test)]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone)]
pub(crate) struct HttpResponse {
    pub status: u16,
    pub body: String,
}

pub(crate) trait HttpTransport: Send + Sync {
    fn send<'a>(&'a self, request: HttpRequest) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn build(
        timeout: Option<Duration>,
        user_agent: Option<&str>,
    ) -> Result<Self, SmsIrError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| SmsIrError::Transport(Box::new(err)))?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn send<'a>(&'a self, request: HttpRequest) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let mut builder = match request.method {
                HttpMethod::Get => self.client.get(&request.url),
                HttpMethod::Post => self.client.post(&request.url),
            };
            for (name, value) in &request.headers {
                builder = builder.header(*name, value.as_str());
            }
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

/// Send `request` and decode the body with `decode`.
///
/// A body that fails to decode is reported as [`SmsIrError::HttpStatus`] when the
/// status is not 2xx, and as [`SmsIrError::Parse`] otherwise.
pub(crate) async fn exchange<T, F>(
    http: &dyn HttpTransport,
    request: HttpRequest,
    decode: F,
) -> Result<T, SmsIrError>
where
    F: FnOnce(&str) -> Result<T, TransportError>,
{
    tracing::trace!(method = ?request.method, url = %request.url, "sending sms.ir request");

    let response = http.send(request).await.map_err(SmsIrError::Transport)?;

    match decode(&response.body) {
        Ok(parsed) => Ok(parsed),
        Err(_) if !(200..=299).contains(&response.status) => {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            Err(SmsIrError::HttpStatus {
                status: response.status,
                body,
            })
        }
        Err(err) => Err(SmsIrError::Parse(Box::new(err))),
    }
}

/// Resolve a configured base URL: empty means [`DEFAULT_BASE_URL`], anything else
/// must be an absolute URL. Trailing slashes are dropped.
pub(crate) fn resolve_base_url(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(DEFAULT_BASE_URL.to_owned());
    }

    Url::parse(trimmed).map_err(|err| ValidationError::InvalidUrl {
        input: trimmed.to_owned(),
        reason: err.to_string(),
    })?;
    Ok(trimmed.trim_end_matches('/').to_owned())
}

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{base_url}/{path}")
}

#[cfg(test)]
pub(crate) mod fake {
    use std::sync::{Arc, Mutex};

    use super::*;

    type Responder = dyn Fn(&HttpRequest, usize) -> Result<HttpResponse, BoxError> + Send + Sync;

    /// In-memory transport that records every request and answers from a closure.
    #[derive(Clone)]
    pub(crate) struct FakeTransport {
        requests: Arc<Mutex<Vec<HttpRequest>>>,
        respond: Arc<Responder>,
    }

    impl FakeTransport {
        pub fn new<F>(respond: F) -> Self
        where
            F: Fn(&HttpRequest, usize) -> Result<HttpResponse, BoxError> + Send + Sync + 'static,
        {
            Self {
                requests: Arc::new(Mutex::new(Vec::new())),
                respond: Arc::new(respond),
            }
        }

        pub fn fixed(status: u16, body: impl Into<String>) -> Self {
            let body = body.into();
            Self::new(move |_, _| {
                Ok(HttpResponse {
                    status,
                    body: body.clone(),
                })
            })
        }

        /// Successful `/token` responses yielding `tokens` in order; the last one repeats.
        pub fn sequence<const N: usize>(tokens: [&'static str; N]) -> Self {
            Self::new(move |_, call| {
                let token = tokens[call.min(N - 1)];
                Ok(HttpResponse {
                    status: 200,
                    body: format!(r#"{{"TokenKey": "{token}", "IsSuccessful": true}}"#),
                })
            })
        }

        pub fn failing(message: &'static str) -> Self {
            Self::new(move |_, _| Err(message.into()))
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    impl HttpTransport for FakeTransport {
        fn send<'a>(
            &'a self,
            request: HttpRequest,
        ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
            Box::pin(async move {
                tokio::task::yield_now().await;
                let call = {
                    let mut requests = self.requests.lock().unwrap();
                    requests.push(request.clone());
                    requests.len() - 1
                };
                tokio::task::yield_now().await;
                (self.respond)(&request, call)
            })
        }
    }
}
