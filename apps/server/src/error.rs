use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cambio_rates::RateError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Rate(#[from] RateError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            // A fetched payload we could not interpret is the upstream's
            // fault; transport and status failures stay generic.
            ApiError::Rate(e) => match e {
                RateError::Parse { .. } => (StatusCode::BAD_GATEWAY, e.to_string()),
                RateError::Upstream { .. } | RateError::Transport { .. } => {
                    tracing::error!("provider call failed: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    )
                }
            },
        };
        let body = Json(ErrorBody { error: msg });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
