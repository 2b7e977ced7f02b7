use std::io;
use std::sync::Arc;

use smsir::{
    BulkSmsClient, Config, MobileNumber, SendByTemplate, TemplateId, TokenProvider, TokenSource,
};
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
    let mobile = MobileNumber::new(required_env("SMSIR_MOBILE")?)?;
    let template_id: i64 = required_env("SMSIR_TEMPLATE_ID")?
        .trim()
        .parse()
        .map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("SMSIR_TEMPLATE_ID: {err}"),
            )
        })?;

    // One token source shared by both calls below.
    let tokens: Arc<dyn TokenSource> = Arc::new(TokenProvider::new(config)?);
    let client = BulkSmsClient::new(tokens);

    let request = SendByTemplate::new(mobile, TemplateId::new(template_id))
        .parameter("VerificationCode", "5566")?
        .parameter("Name", "Ali")?;
    let id = client.send_by_template(request).await?;
    println!("send id: {id}");

    let credit = client.get_credit().await?;
    println!("remaining credit: {credit}");

    Ok(())
}
