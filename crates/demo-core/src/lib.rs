//! demo core: transport-agnostic request/response models and the error type
//! shared by the server crate.
//!
//! This crate carries no runtime, HTTP, or store dependencies so the models can
//! be reused by clients and tests without pulling in the server stack.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. All fallible paths
//! surface as `DemoError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod model;

/// Shared result type.
pub use error::{DemoError, Result};
pub use model::{GetKeyResponse, SetKeyRequest};
