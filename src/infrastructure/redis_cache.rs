//! Redis-backed duplicate-detection cache.
//!
//! Connections come from an r2d2 pool that is built lazily, so the service
//! starts even when Redis is down; lookups then fail open until it returns.

use std::time::Duration;

use redis::{Client, Commands, RedisResult};

use crate::domain::errors::CacheError;
use crate::domain::ports::OrderCache;

pub type RedisPool = r2d2::Pool<Client>;

#[derive(Clone)]
pub struct RedisOrderCache {
    pool: RedisPool,
}

impl RedisOrderCache {
    /// Build a cache for `url`. Only the URL is validated here; no connection
    /// is attempted until the first command.
    ///
    /// `timeout` bounds how long a command waits for a pooled connection.
    pub fn connect(url: &str, timeout: Duration) -> Result<Self, CacheError> {
        let client = Client::open(url).map_err(|e| CacheError(e.to_string()))?;
        let pool = r2d2::Pool::builder()
            .connection_timeout(timeout)
            .build_unchecked(client);
        Ok(Self { pool })
    }
}

impl OrderCache for RedisOrderCache {
    fn exists(&self, key: &str) -> bool {
        let mut conn = match self.pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                log::warn!("Redis unreachable, treating {} as new: {}", key, e);
                return false;
            }
        };
        let found: RedisResult<bool> = conn.exists(key);
        match found {
            Ok(found) => found,
            Err(e) => {
                log::warn!("Redis EXISTS failed, treating {} as new: {}", key, e);
                false
            }
        }
    }

    fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.pool.get().map_err(|e| CacheError(e.to_string()))?;
        let result: RedisResult<()> = conn.pset_ex(key, value, ttl_millis(ttl));
        result.map_err(|e| CacheError(format!("Redis PSETEX failed: {}", e)))
    }
}

/// PSETEX rejects a zero expiry, so sub-millisecond TTLs round up to 1 ms.
fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}
