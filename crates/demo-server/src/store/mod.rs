//! Key/value store seam.
//!
//! Handlers only see `KvStore`. The binary wires a `RedisStore`; tests wire a
//! `MemoryStore`. Each operation is a single call with no retries.

pub mod memory;
pub mod redis;

use async_trait::async_trait;

use demo_core::error::Result;

pub use self::memory::MemoryStore;
pub use self::redis::{RedisStore, StoreTimeouts};

#[async_trait]
pub trait KvStore: Send + Sync {
    /// Liveness check.
    async fn ping(&self) -> Result<()>;

    /// Unconditional write, no expiry.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// `Ok(None)` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;
}
