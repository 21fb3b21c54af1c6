//! Axum router wiring.
//!
//! Application routes sit behind the duration middleware; probes and
//! `/metrics` do not. The write timeout sits inside the middleware so a 408 is
//! still recorded.

use std::time::Duration;

use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    timeout::{RequestBodyTimeoutLayer, TimeoutLayer},
    trace::TraceLayer,
};

use crate::{api, app_state::AppState, ops};

/// Server-side I/O budgets. A zero duration disables that budget.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timeouts {
    /// Bounds reading the request body.
    pub read: Duration,
    /// Bounds producing the response (408 when exceeded).
    pub write: Duration,
}

impl Timeouts {
    pub const NONE: Timeouts = Timeouts { read: Duration::ZERO, write: Duration::ZERO };
}

/// Routes without server timeouts.
pub fn build_router(state: AppState) -> Router {
    build_router_with(state, Timeouts::NONE)
}

pub fn build_router_with(state: AppState, timeouts: Timeouts) -> Router {
    let mut instrumented = Router::new()
        .route("/hello", get(api::hello))
        .route("/redis/set", post(api::redis_set))
        .route("/redis/get/:key", get(api::redis_get));
    if !timeouts.write.is_zero() {
        instrumented = instrumented
            .route_layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeouts.write));
    }
    let instrumented = instrumented
        .route_layer(middleware::from_fn_with_state(state.clone(), api::middleware::track_metrics));

    let mut app = Router::new()
        .merge(instrumented)
        .route("/ready", get(ops::ready))
        .route("/health", get(ops::health))
        .route("/metrics", get(ops::metrics))
        .with_state(state);
    if !timeouts.read.is_zero() {
        app = app.layer(RequestBodyTimeoutLayer::new(timeouts.read));
    }
    app.layer(TraceLayer::new_for_http())
}
