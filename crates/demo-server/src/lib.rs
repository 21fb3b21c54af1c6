//! http-server-demo library entry.
//!
//! Wires the env config, the key/value store, the metrics registry, and the
//! HTTP routes into one axum service. Consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod lifecycle;
pub mod obs;
pub mod ops;
pub mod router;
pub mod store;
