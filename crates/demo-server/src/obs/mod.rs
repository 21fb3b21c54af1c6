//! Observability: JSON structured logging and an in-process metrics registry
//! rendered in Prometheus text format by the `/metrics` handler.

pub mod logging;
pub mod metrics;
