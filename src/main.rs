use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use smarttradenet::app;
use smarttradenet::config::{AppConfig, ProviderKind};
use smarttradenet::external::mock::MockProvider;
use smarttradenet::external::price_provider::PriceProvider;
use smarttradenet::external::yahoo::YahooProvider;
use smarttradenet::logging::{init_logging, LoggingConfig};
use smarttradenet::models::Catalog;
use smarttradenet::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env())
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    let config = AppConfig::from_env().context("invalid configuration")?;

    let provider: Arc<dyn PriceProvider> = match config.provider {
        ProviderKind::Yahoo => {
            tracing::info!("Using price provider: Yahoo Finance");
            Arc::new(YahooProvider::new(config.fetch_timeout).context("failed to build Yahoo client")?)
        }
        ProviderKind::Mock => {
            tracing::warn!("Using price provider: mock random walk (offline mode)");
            Arc::new(MockProvider::new())
        }
    };

    let catalog = Catalog::nse_default();
    tracing::info!(
        "Catalog loaded with {} instruments, signal window {} days",
        catalog.len(),
        config.analysis.window
    );

    let state = AppState {
        catalog: Arc::new(catalog),
        price_provider: provider,
        analysis: Arc::new(config.analysis.clone()),
    };
    let app = app::create_app(state);

    let addr = config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("SmartTradeNet backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
