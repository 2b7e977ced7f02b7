//! Typed Rust client for the sms.ir bulk SMS REST API.
//!
//! The crate has a domain layer of strong types, a transport layer for the JSON
//! wire format, a token layer that fetches and caches the bearer token, and a small
//! client layer orchestrating requests.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use smsir::{BulkSmsClient, Config, SendVerificationCode, TokenProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), smsir::SmsIrError> {
//!     let tokens = TokenProvider::new(Config::new("YOUR_API_KEY", "YOUR_SECRET_KEY")?)?;
//!     let client = BulkSmsClient::new(Arc::new(tokens));
//!
//!     let credit = client.get_credit().await?;
//!     let request = SendVerificationCode::parse("09121234567", "123456")?;
//!     let id = client.send_verification_code(request).await?;
//!     println!("credit: {credit}, verification id: {id}");
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod http;
pub mod token;
mod transport;

pub use client::{BulkSmsClient, BulkSmsClientBuilder, MessagingClient, SmsIrError};
pub use domain::{
    ApiKey, MobileNumber, SecretKey, SendByTemplate, SendId, SendVerificationCode, TemplateId,
    Token, ValidationError, VerificationCode,
};
pub use http::{BoxFuture, DEFAULT_BASE_URL};
pub use token::{Config, StaticTokenSource, TOKEN_TTL, TokenCache, TokenProvider, TokenSource};
