use anyhow::Context;
use hypeburn::{
    api, config::Config, DataSource, HyperliquidDataSource, Poller, SnapshotStore, SupplyAccountant,
};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    // Load configuration
    let config = Config::from_env().context("Configuration error")?;

    let port = config.port;

    let datasource: Arc<dyn DataSource> =
        Arc::new(HyperliquidDataSource::new(config.endpoints.clone()));
    let accountant = Arc::new(SupplyAccountant::new(config.policy.clone()));
    let store = SnapshotStore::new();

    // Each source fills the snapshot on its own schedule; /ready reports until token info lands
    let poller = Poller::new(
        datasource.clone(),
        store.clone(),
        accountant.clone(),
        config.poll,
    );
    let _pollers = poller.spawn_all();

    // Create router
    let app = api::create_router(api::AppState::new(store, accountant, datasource));

    // Bind to address
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Server listening on {}", addr);

    // Run server
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
