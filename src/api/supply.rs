//! Supply breakdown, donut segments and ticker stats from the live snapshot.

use crate::api::AppState;
use crate::domain::{Decimal, Segment, SupplyBreakdown, TokenSupplyInfo};
use crate::engine::{donut_segments, ReadyForSaleExclusions, TickerStats};
use crate::error::AppError;
use crate::orchestration::Snapshot;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyQuery {
    pub exclude_evm: Option<bool>,
    pub exclude_perp_dex: Option<bool>,
}

impl SupplyQuery {
    pub fn exclusions(&self) -> ReadyForSaleExclusions {
        ReadyForSaleExclusions::default()
            .with_evm(self.exclude_evm.unwrap_or(false))
            .with_perp_dex(self.exclude_perp_dex.unwrap_or(false))
    }
}

/// Snapshot plus token info, or 503 until token info has arrived.
pub(crate) async fn snapshot_with_token(
    state: &AppState,
) -> Result<(Snapshot, TokenSupplyInfo), AppError> {
    let snapshot = state.store.read().await;
    let token = snapshot
        .token_info()
        .cloned()
        .ok_or_else(|| AppError::Unavailable("token info not loaded yet".into()))?;
    Ok((snapshot, token))
}

pub async fn get_supply(
    Query(params): Query<SupplyQuery>,
    State(state): State<AppState>,
) -> Result<Json<SupplyBreakdown>, AppError> {
    let (snapshot, token) = snapshot_with_token(&state).await?;
    let breakdown =
        state
            .accountant
            .breakdown(&token, &snapshot.external_balances(), params.exclusions());
    Ok(Json(breakdown))
}

pub async fn get_segments(State(state): State<AppState>) -> Result<Json<Vec<Segment>>, AppError> {
    let (snapshot, token) = snapshot_with_token(&state).await?;
    let breakdown = state.accountant.breakdown(
        &token,
        &snapshot.external_balances(),
        ReadyForSaleExclusions::default(),
    );
    let segments = donut_segments(
        &state.accountant,
        &breakdown,
        state.accountant.policy().min_visible_percent,
    );
    Ok(Json(segments))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: TickerStats,
    /// USDC held by the assistance fund, once polled.
    pub assistance_fund_usdc: Option<Decimal>,
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let (snapshot, token) = snapshot_with_token(&state).await?;
    let balances = snapshot.external_balances();
    let assistance_fund = state.accountant.assistance_fund_balance(&token, &balances);
    let stats = TickerStats::compute(
        &state.accountant,
        &token,
        &balances.resolved(),
        assistance_fund,
        snapshot.market().as_ref(),
    );
    Ok(Json(StatsResponse {
        stats,
        assistance_fund_usdc: snapshot.assistance_fund_usdc(),
    }))
}
