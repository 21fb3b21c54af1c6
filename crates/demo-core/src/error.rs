//! Shared error type across the demo crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Bad or missing configuration.
    Config,
    /// Store unreachable or failed.
    Store,
    /// Graceful shutdown budget exceeded.
    ShutdownTimeout,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::Config => "CONFIG",
            ClientCode::Store => "STORE",
            ClientCode::ShutdownTimeout => "SHUTDOWN_TIMEOUT",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, DemoError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("parsing config: {0}")]
    Config(String),
    #[error("store: {0}")]
    Store(String),
    #[error("shutdown timed out after {0:?}")]
    ShutdownTimeout(std::time::Duration),
    #[error("internal: {0}")]
    Internal(String),
}

impl DemoError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            DemoError::Config(_) => ClientCode::Config,
            DemoError::Store(_) => ClientCode::Store,
            DemoError::ShutdownTimeout(_) => ClientCode::ShutdownTimeout,
            DemoError::Internal(_) => ClientCode::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(DemoError::Config("x".into()).client_code().as_str(), "CONFIG");
        assert_eq!(
            DemoError::ShutdownTimeout(std::time::Duration::from_secs(5)).client_code().as_str(),
            "SHUTDOWN_TIMEOUT"
        );
        assert_eq!(DemoError::Store("down".into()).client_code(), ClientCode::Store);
    }

    #[test]
    fn config_error_names_the_variable() {
        let e = DemoError::Config("required key REDIS_PASSWORD missing value".into());
        assert_eq!(e.to_string(), "parsing config: required key REDIS_PASSWORD missing value");
    }
}
