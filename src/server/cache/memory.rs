use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::server::{cache::Cache, error::cache::CacheError};

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// How often a write sweeps every expired entry out of the map
const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug)]
struct Entries {
    map: HashMap<String, Entry>,
    last_sweep: Instant,
}

/// Process-local cache with per-entry expiry.
///
/// Expired entries are dropped when read, and writes sweep out every expired entry at most
/// once per sweep interval. There is no size bound or LRU eviction.
#[derive(Debug)]
pub struct InMemoryCache {
    entries: RwLock<Entries>,
    sweep_interval: Duration,
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::with_sweep_interval(DEFAULT_SWEEP_INTERVAL)
    }
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sweep_interval(sweep_interval: Duration) -> Self {
        Self {
            entries: RwLock::new(Entries {
                map: HashMap::new(),
                last_sweep: Instant::now(),
            }),
            sweep_interval,
        }
    }

    /// Number of stored entries, including expired ones not yet swept
    pub async fn len(&self) -> usize {
        self.entries.read().await.map.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.map.is_empty()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        {
            let entries = self.entries.read().await;
            match entries.map.get(key) {
                None => return Ok(None),
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Ok(Some(entry.value.clone()))
                }
                Some(_) => {}
            }
        }

        // Expired, drop it unless someone replaced it in the meantime
        let mut entries = self.entries.write().await;
        if entries
            .map
            .get(key)
            .is_some_and(|entry| entry.expires_at <= Instant::now())
        {
            entries.map.remove(key);
        }

        Ok(None)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let now = Instant::now();
        let entry = Entry {
            value,
            expires_at: now + ttl,
        };

        let mut entries = self.entries.write().await;
        if now.duration_since(entries.last_sweep) >= self.sweep_interval {
            entries.map.retain(|_, entry| entry.expires_at > now);
            entries.last_sweep = now;
        }
        entries.map.insert(key.to_string(), entry);

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.write().await.map.remove(key);

        Ok(())
    }
}
