//! Redis-backed store.
//!
//! Holds one multiplexed connection for the process lifetime. The handle is
//! cheap to clone and safe to use from concurrent requests, so every call
//! clones it instead of taking a lock. Dialing and every command are bounded,
//! so an unresponsive server surfaces as a store error instead of a hang.

use std::time::Duration;

use async_trait::async_trait;
use redis::{
    aio::MultiplexedConnection, AsyncCommands, AsyncConnectionConfig, IntoConnectionInfo,
};

use demo_core::error::{DemoError, Result};

use super::KvStore;

fn store_err(context: &str) -> impl Fn(redis::RedisError) -> DemoError + '_ {
    move |e| DemoError::Store(format!("{context}: {e}"))
}

/// Dial and per-command budgets.
#[derive(Debug, Clone, Copy)]
pub struct StoreTimeouts {
    pub connect: Duration,
    pub response: Duration,
}

impl Default for StoreTimeouts {
    fn default() -> Self {
        Self { connect: Duration::from_secs(5), response: Duration::from_secs(3) }
    }
}

#[derive(Clone)]
pub struct RedisStore {
    conn: MultiplexedConnection,
}

impl RedisStore {
    /// Open the connection and PING it with the default budgets.
    pub async fn connect(address: &str, password: &str) -> Result<Self> {
        Self::connect_with(address, password, StoreTimeouts::default()).await
    }

    /// Open the connection and PING it. Fails if the server is unreachable,
    /// silent past the budgets, or rejects the credential.
    pub async fn connect_with(address: &str, password: &str, timeouts: StoreTimeouts) -> Result<Self> {
        let mut info = format!("redis://{address}")
            .as_str()
            .into_connection_info()
            .map_err(store_err("invalid redis address"))?;
        if !password.is_empty() {
            info.redis.password = Some(password.to_string());
        }

        let client = redis::Client::open(info).map_err(store_err("opening redis client"))?;
        let config = AsyncConnectionConfig::new()
            .set_connection_timeout(timeouts.connect)
            .set_response_timeout(timeouts.response);

        let startup = async {
            let conn = client
                .get_multiplexed_async_connection_with_config(&config)
                .await
                .map_err(store_err("connecting to redis"))?;
            let store = Self { conn };
            store.ping().await?;
            Ok::<_, DemoError>(store)
        };

        // one deadline over handshake + PING
        tokio::time::timeout(timeouts.connect + timeouts.response, startup)
            .await
            .map_err(|_| {
                DemoError::Store(format!(
                    "connecting to redis: no answer from {address} within {:?}",
                    timeouts.connect + timeouts.response
                ))
            })?
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(store_err("pinging redis client"))?;
        Ok(())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.set(key, value).await.map_err(store_err("set"))?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        conn.get(key).await.map_err(store_err("get"))
    }
}
