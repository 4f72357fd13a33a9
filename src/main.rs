use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use product_gateway::app_state::AppState;
use product_gateway::config::load_config;
use product_gateway::create_app;
use product_gateway::credentials::ManagedIdentityCredential;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    let config = load_config()?;
    info!("Configuration loaded successfully");
    info!(
        "Upstream: {} ({} allowed categories)",
        config.upstream.base_url,
        config.upstream.allowed_categories().len()
    );

    let http = reqwest::Client::new();
    let credential = Arc::new(ManagedIdentityCredential::new(http.clone()));

    let state = AppState::new(config.clone(), http, credential);
    let app = create_app(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Product gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
