//! Leaderboard placement of a balance (by default, the trading burn).

use crate::api::supply::snapshot_with_token;
use crate::api::AppState;
use crate::domain::Decimal;
use crate::engine::{first_rank_above_balance, to_ordinal};
use crate::error::AppError;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RankQuery {
    pub balance: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub balance: Decimal,
    pub rank: Option<u32>,
    pub ordinal: Option<String>,
}

pub async fn get_rank(
    Query(params): Query<RankQuery>,
    State(state): State<AppState>,
) -> Result<Json<RankResponse>, AppError> {
    let balance = match params.balance.as_deref() {
        Some(raw) => Decimal::parse_amount(raw)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid balance: {}", raw)))?,
        None => {
            let (_, token) = snapshot_with_token(&state).await?;
            state
                .accountant
                .burned_from_trading(token.total_supply_or_zero())
        }
    };

    let rows = state.datasource.fetch_leaderboard().await?;
    let rank = first_rank_above_balance(&rows, balance);

    Ok(Json(RankResponse {
        balance,
        rank,
        ordinal: rank.map(to_ordinal),
    }))
}
