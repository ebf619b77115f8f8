//! Years-to-buy heatmap for the ready-for-sale supply.

use crate::api::supply::snapshot_with_token;
use crate::api::AppState;
use crate::domain::{Decimal, FeePeriod};
use crate::engine::{years_to_buy_grid, HeatmapRow, ReadyForSaleExclusions, PRICE_ROWS};
use crate::error::AppError;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapQuery {
    pub period: Option<FeePeriod>,
    pub exclude_evm: Option<bool>,
    /// Overrides the live mark price.
    pub price: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapResponse {
    pub mark_price: Decimal,
    pub daily_revenue: Decimal,
    pub ready_for_sale_supply: Decimal,
    pub rows: Vec<HeatmapRow>,
}

pub async fn get_heatmap(
    Query(params): Query<HeatmapQuery>,
    State(state): State<AppState>,
) -> Result<Json<HeatmapResponse>, AppError> {
    let override_price = params
        .price
        .as_deref()
        .map(|p| match Decimal::parse_amount(p) {
            Some(price) if price.is_positive() => Ok(price),
            _ => Err(AppError::BadRequest(format!("Invalid price: {}", p))),
        })
        .transpose()?;

    let (snapshot, token) = snapshot_with_token(&state).await?;

    let mark_price = override_price
        .or_else(|| snapshot.market().map(|m| m.mark_px))
        .ok_or_else(|| AppError::Unavailable("mark price not loaded yet".into()))?;

    let fees = snapshot
        .fee_windows()
        .ok_or_else(|| AppError::Unavailable("fee history not loaded yet".into()))?;
    let daily_revenue = fees.get(params.period.unwrap_or(FeePeriod::OneDay));

    let exclusions = ReadyForSaleExclusions::default().with_evm(params.exclude_evm.unwrap_or(false));
    let breakdown = state
        .accountant
        .breakdown(&token, &snapshot.external_balances(), exclusions);

    let rows = years_to_buy_grid(
        mark_price,
        daily_revenue,
        breakdown.ready_for_sale_supply,
        state.accountant.policy().buyback_share,
    );
    if rows.len() != PRICE_ROWS {
        return Err(AppError::BadRequest(format!(
            "Price out of range: {}",
            mark_price
        )));
    }

    Ok(Json(HeatmapResponse {
        mark_price: mark_price.round_dp(1),
        daily_revenue,
        ready_for_sale_supply: breakdown.ready_for_sale_supply,
        rows,
    }))
}
