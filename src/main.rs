use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;
use api::Config;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::var("PORTFOLIO_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("Config.toml"));
    let secrets_path = std::env::var("PORTFOLIO_SECRETS")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("Secrets.toml"));

    let config = Config::load(&config_path, &secrets_path)?;
    let address = config.server.address()?;

    let router = api::serve(config).await?;

    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!(task = "listen", address = %address);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("server stopped")?;

    Ok(())
}
