//! Per-validator stake, fetched on demand.

use crate::api::AppState;
use crate::domain::ValidatorStake;
use crate::error::AppError;
use axum::extract::State;
use axum::Json;

pub async fn get_validators(
    State(state): State<AppState>,
) -> Result<Json<Vec<ValidatorStake>>, AppError> {
    Ok(Json(state.datasource.fetch_validators().await?))
}
