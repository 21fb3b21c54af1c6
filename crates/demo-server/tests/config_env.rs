#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashMap;
use std::time::Duration;

use demo_server::config;

fn load(vars: &[(&str, &str)]) -> demo_core::Result<config::Config> {
    let env: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    config::from_lookup(|name| env.get(name).cloned())
}

#[test]
fn defaults_with_only_password() {
    let cfg = load(&[("REDIS_PASSWORD", "secret")]).expect("must parse");
    assert_eq!(cfg.server_address, "0.0.0.0:3000");
    assert_eq!(cfg.server_read_timeout, Duration::from_secs(5));
    assert_eq!(cfg.server_write_timeout, Duration::from_secs(15));
    assert_eq!(cfg.redis_address, "0.0.0.0:6379");
    assert_eq!(cfg.redis_password, "secret");
}

#[test]
fn missing_password_fails() {
    let err = load(&[]).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "CONFIG");
    assert!(err.to_string().contains("REDIS_PASSWORD"));
}

#[test]
fn empty_password_counts_as_set() {
    let cfg = load(&[("REDIS_PASSWORD", "")]).expect("must parse");
    assert!(cfg.redis_password.is_empty());
}

#[test]
fn overrides_are_applied() {
    let cfg = load(&[
        ("SERVER_ADDRESS", "127.0.0.1:8081"),
        ("SERVER_READ_TIMEOUT", "2s"),
        ("SERVER_WRITE_TIMEOUT", "1m"),
        ("REDIS_ADDRESS", "redis.internal:6380"),
        ("REDIS_PASSWORD", "pw"),
    ])
    .expect("must parse");
    assert_eq!(cfg.server_address, "127.0.0.1:8081");
    assert_eq!(cfg.server_read_timeout, Duration::from_secs(2));
    assert_eq!(cfg.server_write_timeout, Duration::from_secs(60));
    assert_eq!(cfg.redis_address, "redis.internal:6380");
}

#[test]
fn unparsable_values_fail_fast() {
    for (name, value) in [
        ("SERVER_ADDRESS", "not-an-address"),
        ("SERVER_READ_TIMEOUT", "five"),
        ("SERVER_WRITE_TIMEOUT", "15"),
        ("REDIS_ADDRESS", "localhost"),
        ("REDIS_ADDRESS", "localhost:port"),
    ] {
        let err = load(&[(name, value), ("REDIS_PASSWORD", "pw")]).expect_err(name);
        assert_eq!(err.client_code().as_str(), "CONFIG", "{name}={value}");
        assert!(err.to_string().contains(name), "{err}");
    }
}

#[test]
fn empty_or_named_hosts_are_accepted() {
    let cfg = load(&[
        ("SERVER_ADDRESS", ":3000"),
        ("REDIS_ADDRESS", ":6379"),
        ("REDIS_PASSWORD", "pw"),
    ])
    .expect("must parse");
    assert_eq!(cfg.server_address, "0.0.0.0:3000");
    assert_eq!(cfg.redis_address, "127.0.0.1:6379");

    let cfg = load(&[("SERVER_ADDRESS", "localhost:3000"), ("REDIS_PASSWORD", "pw")])
        .expect("must parse");
    assert_eq!(cfg.server_address, "localhost:3000");
}

#[test]
fn zero_timeouts_mean_no_timeout() {
    let cfg = load(&[
        ("SERVER_READ_TIMEOUT", "0"),
        ("SERVER_WRITE_TIMEOUT", "0s"),
        ("REDIS_PASSWORD", "pw"),
    ])
    .expect("must parse");
    assert!(cfg.server_read_timeout.is_zero());
    assert!(cfg.server_write_timeout.is_zero());
}
