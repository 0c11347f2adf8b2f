// ⚠️ API Errors - one enum, one JSON shape
//
// Every failure leaves the server as `{ "error": "<message>" }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Result type alias using [`ApiError`].
pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// No expense with the requested id
    #[error("Expense not found")]
    NotFound,

    /// Request body could not be bound to an expense
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
