use anyhow::Result;
use locale_gateway::{config, server};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("locale_gateway=info".parse()?),
        )
        .init();

    info!("Starting locale gateway");

    let config = config::Config::from_env()?;
    server::serve(config).await
}
