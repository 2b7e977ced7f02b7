use std::io;
use std::sync::Arc;

use smsir::{BulkSmsClient, Config, TokenProvider};
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
    let tokens = TokenProvider::new(config)?;
    let client = BulkSmsClient::new(Arc::new(tokens));

    let credit = client.get_credit().await?;
    println!("credit: {credit}");

    Ok(())
}
