//! Price against revenue moving averages, fetched on demand.

use crate::api::AppState;
use crate::domain::CombinedChartRow;
use crate::engine::combine_price_revenue;
use crate::error::AppError;
use axum::extract::State;
use axum::Json;

pub async fn get_revenue(
    State(state): State<AppState>,
) -> Result<Json<Vec<CombinedChartRow>>, AppError> {
    let (prices, revenue) = tokio::try_join!(
        state.datasource.fetch_price_history(),
        state.datasource.fetch_revenue_history(),
    )?;
    Ok(Json(combine_price_revenue(&prices, &revenue)))
}
