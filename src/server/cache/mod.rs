//! Key/TTL cache abstraction.
//!
//! Every service depends on [`Cache`] only, never on a concrete backend. Two backends are
//! provided: [`InMemoryCache`] for tests and single-node runs, and [`ValkeyCache`] backed by a
//! shared `fred` pool.
//!
//! Values are stored as JSON strings; the typed helpers on `dyn Cache` (`get_json`,
//! `set_json`, [`get_or_set`](trait.Cache.html#method.get_or_set)) handle (de)serialization.
//!
//! ## Concurrent misses
//!
//! `get_or_set` does not de-duplicate concurrent misses on the same key: two callers racing
//! on a cold key may both run their compute function and both store the result. Upstream
//! APIs tolerate the duplicate request, so no per-key in-flight map is kept.

pub mod keys;
mod memory;
mod valkey;

pub use memory::InMemoryCache;
pub use valkey::ValkeyCache;

use std::{future::Future, time::Duration};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::server::error::cache::CacheError;

/// Capability interface for a key/TTL store.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Returns the stored value, or `None` when the key is absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores a value that expires after `ttl`.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;

    /// Removes a key; removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

impl<'c> dyn Cache + 'c {
    /// Reads and deserializes a value.
    ///
    /// Backend failures and undecodable payloads are logged and reported as a miss so a
    /// broken cache degrades to the uncached path instead of failing the request.
    pub async fn get_json<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let raw = match self.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = %key, "Cache read failed, treating as miss: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key = %key, "Discarding undecodable cache entry: {}", e);
                None
            }
        }
    }

    /// Serializes and stores a value, logging rather than failing on backend errors.
    pub async fn set_json<T>(&self, key: &str, value: &T, ttl: Duration)
    where
        T: Serialize + Sync,
    {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                let err = CacheError::Serialization {
                    key: key.to_string(),
                    message: e.to_string(),
                };
                tracing::warn!("{}", err);
                return;
            }
        };

        if let Err(e) = self.set(key, raw, ttl).await {
            tracing::warn!(key = %key, "Cache write failed: {}", e);
        }
    }

    /// Removes a key, logging backend failures.
    pub async fn invalidate(&self, key: &str) {
        if let Err(e) = self.delete(key).await {
            tracing::warn!(key = %key, "Cache invalidation failed: {}", e);
        }
    }

    /// Returns the cached value for `key`, computing and storing it on a miss.
    ///
    /// On a hit `compute` is not invoked. On a miss `compute` runs exactly once; its value is
    /// stored only when it succeeds. A failing `compute` propagates its error and leaves the
    /// key empty, so the next call computes again (no negative caching).
    pub async fn get_or_set<T, E, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        compute: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned + Sync,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(cached) = self.get_json::<T>(key).await {
            tracing::trace!(key = %key, "Cache hit");
            return Ok(cached);
        }

        tracing::trace!(key = %key, "Cache miss");
        let value = compute().await?;
        self.set_json(key, &value, ttl).await;

        Ok(value)
    }
}
