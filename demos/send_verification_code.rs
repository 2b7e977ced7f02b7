use std::io;
use std::sync::Arc;

use smsir::{BulkSmsClient, Config, SendVerificationCode, TokenProvider};
use tracing_subscriber::EnvFilter;

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::new(
        required_env("SMSIR_API_KEY")?,
        required_env("SMSIR_SECRET_KEY")?,
    )?;
    let mobile = required_env("SMSIR_MOBILE")?;
    let code = std::env::var("SMSIR_CODE").unwrap_or_else(|_| "123456".to_owned());

    let client = BulkSmsClient::new(Arc::new(TokenProvider::new(config)?));
    let request = SendVerificationCode::parse(mobile, code)?;

    let id = client.send_verification_code(request).await?;
    println!("verification id: {id}");

    Ok(())
}
