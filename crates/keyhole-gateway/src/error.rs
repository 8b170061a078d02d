use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::warn;

use crate::model::ErrorResponse;
use keyhole_core::CacheError;
use keyhole_ingest::ImportError;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("short url '{0}' not found")]
    NotFound(String),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error("resolution failed: {0}")]
    Resolve(#[from] CacheError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Import(ImportError::MissingColumn { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Import(ImportError::Csv(_)) => StatusCode::BAD_REQUEST,
            ApiError::Resolve(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            warn!(error = %self, "request failed");
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
