//! HTTP mapping for per-request failures.
//!
//! Bodies are short plain-text messages; details only go to the log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use demo_core::error::DemoError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("key not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(DemoError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            ApiError::InvalidBody(_) => "invalid request body\n",
            ApiError::NotFound(_) => "key not found\n",
            ApiError::Store(_) => "internal error\n",
        }
    }
}

/// Anything the store layer reports is a server-side failure.
impl From<DemoError> for ApiError {
    fn from(e: DemoError) -> Self {
        ApiError::Store(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.public_message()).into_response()
    }
}
