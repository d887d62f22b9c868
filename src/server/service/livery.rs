use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use crate::server::{
    cache::{keys, Cache},
    data::va::livery_mapping::LiveryMappingRepository,
    error::Error,
};

pub const UNKNOWN_AIRCRAFT: &str = "Unknown Aircraft";
pub const UNKNOWN_AIRLINE: &str = "Unknown Airline";

/// Readable names for a Live API livery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveryNames {
    pub aircraft: String,
    pub airline: String,
}

impl Default for LiveryNames {
    fn default() -> Self {
        Self {
            aircraft: UNKNOWN_AIRCRAFT.to_string(),
            airline: UNKNOWN_AIRLINE.to_string(),
        }
    }
}

pub struct LiveryService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a dyn Cache,
}

impl<'a> LiveryService<'a> {
    pub fn new(db: &'a DatabaseConnection, cache: &'a dyn Cache) -> Self {
        Self { db, cache }
    }

    /// Resolves a livery to aircraft and airline names through the cache.
    ///
    /// Unmapped liveries are not cached so a mapping added later is picked up immediately.
    ///
    /// # Returns
    /// - `Ok(LiveryNames)` - Names from the VA's livery mapping
    /// - `Err(Error::NotFound)` - No mapping exists for this livery
    /// - `Err(Error::DbErr)` - Database query failed
    pub async fn get_names(&self, va_id: i32, livery_id: &str) -> Result<LiveryNames, Error> {
        let db = self.db;

        self.cache
            .get_or_set(&keys::livery(va_id, livery_id), keys::LIVERY_TTL, move || async move {
                let mapping = LiveryMappingRepository::new(db)
                    .get_by_livery(va_id, livery_id)
                    .await?
                    .ok_or_else(|| {
                        Error::NotFound(format!("No livery mapping for livery {}", livery_id))
                    })?;

                Ok(LiveryNames {
                    aircraft: mapping.aircraft_name,
                    airline: mapping.airline_name,
                })
            })
            .await
    }

    /// Like [`get_names`](Self::get_names) but falls back to the unknown defaults
    pub async fn get_names_or_default(&self, va_id: i32, livery_id: &str) -> LiveryNames {
        match self.get_names(va_id, livery_id).await {
            Ok(names) => names,
            Err(Error::NotFound(message)) => {
                tracing::debug!(va_id = va_id, "{}", message);
                LiveryNames::default()
            }
            Err(e) => {
                tracing::warn!(va_id = va_id, livery_id = %livery_id, "Livery lookup failed: {}", e);
                LiveryNames::default()
            }
        }
    }
}
