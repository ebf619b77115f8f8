pub mod health;
pub mod heatmap;
pub mod rank;
pub mod revenue;
pub mod supply;
pub mod validators;

use crate::datasource::DataSource;
use crate::engine::SupplyAccountant;
use crate::orchestration::SnapshotStore;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub store: SnapshotStore,
    pub accountant: Arc<SupplyAccountant>,
    pub datasource: Arc<dyn DataSource>,
}

impl AppState {
    pub fn new(
        store: SnapshotStore,
        accountant: Arc<SupplyAccountant>,
        datasource: Arc<dyn DataSource>,
    ) -> Self {
        Self {
            store,
            accountant,
            datasource,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/supply", get(supply::get_supply))
        .route("/v1/supply/segments", get(supply::get_segments))
        .route("/v1/stats", get(supply::get_stats))
        .route("/v1/heatmap", get(heatmap::get_heatmap))
        .route("/v1/revenue", get(revenue::get_revenue))
        .route("/v1/rank", get(rank::get_rank))
        .route("/v1/validators", get(validators::get_validators))
        .layer(cors)
        .with_state(state)
}
