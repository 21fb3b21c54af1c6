//! Application routes: hello world and the store-backed set/get pair.
//!
//! Every handler makes at most one store call and maps failures through
//! `ApiError`. Success and failure are both logged.

pub mod error;
pub mod middleware;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{error, info};

use demo_core::model::{GetKeyResponse, SetKeyRequest};

use crate::app_state::AppState;

pub use error::ApiError;

pub const HELLO_BODY: &str = "Hello World!\n";

pub async fn hello(State(state): State<AppState>) -> (StatusCode, &'static str) {
    state.metrics().hello_requests.inc(&[]);
    info!("Hello World!");
    (StatusCode::OK, HELLO_BODY)
}

/// `POST /redis/set`. The body is decoded by hand so a missing or wrong
/// content type is not rejected before decoding.
pub async fn redis_set(State(state): State<AppState>, body: Bytes) -> Result<StatusCode, ApiError> {
    let req: SetKeyRequest = serde_json::from_slice(&body).map_err(|e| {
        error!(error = %e, "failed to decode request body");
        ApiError::InvalidBody(e.to_string())
    })?;

    state.store().set(&req.key, &req.value).await.map_err(|e| {
        error!(error = %e, "failed to set key");
        ApiError::from(e)
    })?;

    info!("key added successfully!");
    Ok(StatusCode::OK)
}

pub async fn redis_get(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetKeyResponse>, ApiError> {
    let value = match state.store().get(&key).await {
        Ok(Some(v)) => v,
        Ok(None) => {
            error!(%key, "failed to get key: not found");
            return Err(ApiError::NotFound(key));
        }
        Err(e) => {
            error!(error = %e, "failed to get key");
            return Err(ApiError::from(e));
        }
    };

    info!("key retrieved successfully!");
    Ok(Json(GetKeyResponse { key, value }))
}
