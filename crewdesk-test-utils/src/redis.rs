use fred::prelude::*;

use crate::TestError;

/// Redis test setup with a per-test key namespace
///
/// Requires a Valkey/Redis server on `127.0.0.1:6379`; tests using it are gated behind the
/// `redis-test` feature.
pub struct RedisTest {
    pub redis_pool: Pool,
    namespace: String,
}

impl RedisTest {
    pub async fn new() -> Result<Self, TestError> {
        let redis_config = Config::from_url("redis://127.0.0.1:6379")?;
        let redis_pool = Pool::new(redis_config, None, None, None, 5)?;
        redis_pool.init().await?;

        Ok(RedisTest {
            redis_pool,
            namespace: Self::generate_unique_namespace(),
        })
    }

    /// Unique key prefix so tests running in parallel never share keys
    pub fn namespace(&self) -> String {
        self.namespace.clone()
    }

    fn generate_unique_namespace() -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};
        use std::time::{SystemTime, UNIX_EPOCH};

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();

        let mut hasher = DefaultHasher::new();
        timestamp.hash(&mut hasher);
        std::thread::current().id().hash(&mut hasher);

        format!("test:{}:{:x}:cache", timestamp, hasher.finish())
    }
}
