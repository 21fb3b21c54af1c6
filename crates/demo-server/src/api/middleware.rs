//! Request duration instrumentation.
//!
//! Wraps the inner service and reads the status from the response it produced
//! before the response is handed back to the transport.

use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::app_state::AppState;

pub async fn track_metrics(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let route = req.uri().path().to_owned();
    let method = req.method().clone();

    let response = next.run(req).await;

    state.metrics().observe_request(
        &route,
        method.as_str(),
        response.status().as_u16(),
        started_at.elapsed(),
    );
    response
}
