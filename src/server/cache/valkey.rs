use std::time::Duration;

use async_trait::async_trait;
use fred::{prelude::*, types::Expiration};

use crate::server::{cache::Cache, error::cache::CacheError};

static DEFAULT_NAMESPACE: &str = "crewdesk:cache";

/// Cache shared between server instances, stored in Valkey/Redis.
#[derive(Clone)]
pub struct ValkeyCache {
    pool: Pool,
    /// Key prefix (allows namespacing for test isolation)
    namespace: String,
}

impl ValkeyCache {
    pub fn new(pool: Pool) -> Self {
        Self::with_namespace(pool, DEFAULT_NAMESPACE.to_string())
    }

    /// Create a cache with a custom key prefix (useful for testing)
    pub fn with_namespace(pool: Pool, namespace: String) -> Self {
        Self { pool, namespace }
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}:{}", self.namespace, key)
    }
}

#[async_trait]
impl Cache for ValkeyCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let value: Option<String> = self.pool.get(self.namespaced(key)).await?;

        Ok(value)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        // EX takes whole seconds; sub-second TTLs round up rather than never expiring
        let seconds = ttl.as_secs().max(1) as i64;

        let _: () = self
            .pool
            .set(
                self.namespaced(key),
                value,
                Some(Expiration::EX(seconds)),
                None,
                false,
            )
            .await?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let _: i64 = self.pool.del(self.namespaced(key)).await?;

        Ok(())
    }
}
