use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tiger_relay::config::{Config, Provider};
use tiger_relay::relay::Relay;
use tiger_relay::server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tiger_relay=info")),
        )
        .init();

    let config = Config::from_env();
    for provider in Provider::ALL {
        if config.api_key(provider).is_none() {
            warn!(
                "{} is not set; the {} provider is disabled",
                provider.key_var(),
                provider
            );
        }
    }

    let relay = Arc::new(Relay::new(&config));
    let app = server::router(relay);

    let addr = format!("0.0.0.0:{}", config.port);
    info!("tiger-relay listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
