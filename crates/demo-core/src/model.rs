//! Key/value request and response bodies.
//!
//! Both records are flat and only require the presence of their fields; no
//! length or charset rules are applied to keys or values.

use serde::{Deserialize, Serialize};

/// Body of `POST /redis/set`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SetKeyRequest {
    pub key: String,
    pub value: String,
}

/// Body of a successful `GET /redis/get/{key}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GetKeyResponse {
    pub key: String,
    pub value: String,
}

impl GetKeyResponse {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into() }
    }
}
