use std::time::Duration;

use demo_core::error::{DemoError, Result};

/// Host used when `SERVER_ADDRESS` has an empty host (`:3000`): all interfaces.
pub const WILDCARD_HOST: &str = "0.0.0.0";
/// Host used when `REDIS_ADDRESS` has an empty host (`:6379`): the local system.
pub const LOCAL_HOST: &str = "127.0.0.1";

/// Flat process settings, populated from the environment.
///
/// Addresses are kept as `host:port` strings; host names are resolved when
/// binding or dialing. Zero timeouts mean "no timeout".
#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub server_read_timeout: Duration,
    pub server_write_timeout: Duration,

    pub redis_address: String,
    pub redis_password: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        split_host_port("SERVER_ADDRESS", &self.server_address)?;
        split_host_port("REDIS_ADDRESS", &self.redis_address)?;
        Ok(())
    }
}

/// Split `host:port`; the host may be empty, a name, or a bracketed IPv6 literal.
pub(crate) fn split_host_port<'a>(name: &str, raw: &'a str) -> Result<(&'a str, u16)> {
    let bad = || DemoError::Config(format!("{name} must be host:port, got {raw:?}"));
    let (host, port) = raw.rsplit_once(':').ok_or_else(bad)?;
    let port = port.parse::<u16>().map_err(|_| bad())?;
    if host.contains(':') && !(host.starts_with('[') && host.ends_with(']')) {
        return Err(bad());
    }
    Ok((host, port))
}

/// Fill an empty host with `default_host`, leaving other forms untouched.
pub(crate) fn with_default_host(name: &str, raw: &str, default_host: &str) -> Result<String> {
    let (host, port) = split_host_port(name, raw)?;
    if host.is_empty() {
        Ok(format!("{default_host}:{port}"))
    } else {
        Ok(raw.to_string())
    }
}

pub(crate) fn default_server_address() -> &'static str {
    "0.0.0.0:3000"
}
pub(crate) fn default_server_read_timeout() -> &'static str {
    "5s"
}
pub(crate) fn default_server_write_timeout() -> &'static str {
    "15s"
}
pub(crate) fn default_redis_address() -> &'static str {
    "0.0.0.0:6379"
}
