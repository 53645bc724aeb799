use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

/// Outcomes of a book request that are not a success
#[derive(Debug, Error, PartialEq)]
pub enum ApiError {
    #[error("book not found")]
    NotFound,
    #[error("isbn already exists")]
    IsbnTaken,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::IsbnTaken => StatusCode::BAD_REQUEST.into_response(),
            ApiError::Store(e) => {
                error!("store failure: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
            }
        }
    }
}
