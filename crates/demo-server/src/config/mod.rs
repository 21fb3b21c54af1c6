//! Environment config loader (strict parsing, fail fast).
//!
//! | var                  | default        |
//! |----------------------|----------------|
//! | SERVER_ADDRESS       | 0.0.0.0:3000   |
//! | SERVER_READ_TIMEOUT  | 5s             |
//! | SERVER_WRITE_TIMEOUT | 15s            |
//! | REDIS_ADDRESS        | 0.0.0.0:6379   |
//! | REDIS_PASSWORD       | required       |

pub mod schema;

use std::time::Duration;

use demo_core::error::{DemoError, Result};

pub use schema::Config;

pub fn from_env() -> Result<Config> {
    from_lookup(|name| std::env::var(name).ok())
}

/// Build the config from an arbitrary variable source.
///
/// A variable that is set to the empty string counts as present; this matters
/// for `REDIS_PASSWORD`, where an empty value means "no AUTH".
pub fn from_lookup<F>(lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

    let cfg = Config {
        server_address: schema::with_default_host(
            "SERVER_ADDRESS",
            &var("SERVER_ADDRESS", schema::default_server_address()),
            schema::WILDCARD_HOST,
        )?,
        server_read_timeout: duration(
            "SERVER_READ_TIMEOUT",
            &var("SERVER_READ_TIMEOUT", schema::default_server_read_timeout()),
        )?,
        server_write_timeout: duration(
            "SERVER_WRITE_TIMEOUT",
            &var("SERVER_WRITE_TIMEOUT", schema::default_server_write_timeout()),
        )?,
        redis_address: schema::with_default_host(
            "REDIS_ADDRESS",
            &var("REDIS_ADDRESS", schema::default_redis_address()),
            schema::LOCAL_HOST,
        )?,
        redis_password: lookup("REDIS_PASSWORD").ok_or_else(|| {
            DemoError::Config("required key REDIS_PASSWORD missing value".into())
        })?,
    };
    cfg.validate()?;
    Ok(cfg)
}

/// A bare `0` is accepted as "no timeout".
fn duration(name: &str, raw: &str) -> Result<Duration> {
    let raw = raw.trim();
    if raw == "0" {
        return Ok(Duration::ZERO);
    }
    humantime::parse_duration(raw)
        .map_err(|e| DemoError::Config(format!("{name} {raw:?}: {e}")))
}
