use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    /// A required source has not reported yet.
    #[error("Unavailable: {0}")]
    Unavailable(String),
    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl From<crate::datasource::DataSourceError> for AppError {
    fn from(err: crate::datasource::DataSourceError) -> Self {
        match err {
            crate::datasource::DataSourceError::Unconfigured(what) => {
                AppError::NotFound(format!("{} is not configured", what))
            }
            other => AppError::Upstream(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::DataSourceError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::Unavailable("token info".into()), StatusCode::SERVICE_UNAVAILABLE),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (AppError::from(DataSourceError::RateLimited), StatusCode::BAD_GATEWAY),
            (
                AppError::from(DataSourceError::Unconfigured("PROJECT_API_URL".into())),
                StatusCode::NOT_FOUND,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
