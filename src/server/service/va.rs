use sea_orm::DatabaseConnection;

use crate::server::{
    cache::{keys, Cache},
    data::va::virtual_airline::VirtualAirlineRepository,
    error::Error,
    model::va::VaConfig,
};

/// Cached access to VA configuration.
pub struct VirtualAirlineService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a dyn Cache,
}

impl<'a> VirtualAirlineService<'a> {
    pub fn new(db: &'a DatabaseConnection, cache: &'a dyn Cache) -> Self {
        Self { db, cache }
    }

    /// Loads the VA's typed configuration, reading through the cache.
    ///
    /// # Returns
    /// - `Ok(VaConfig)` - Configuration of the VA
    /// - `Err(Error::NotFound)` - No VA with this ID exists
    /// - `Err(Error::ConfigError)` - Stored flight modes no longer decode
    /// - `Err(Error::DbErr)` - Database query failed
    pub async fn get_config(&self, va_id: i32) -> Result<VaConfig, Error> {
        let db = self.db;

        self.cache
            .get_or_set(&keys::va_config(va_id), keys::VA_CONFIG_TTL, move || async move {
                let va = VirtualAirlineRepository::new(db)
                    .get_by_id(va_id)
                    .await?
                    .ok_or_else(|| Error::NotFound(format!("Virtual airline {} not found", va_id)))?;

                Ok(VaConfig::from_model(va)?)
            })
            .await
    }

    /// Drops the cached configuration after the VA was changed
    pub async fn invalidate(&self, va_id: i32) {
        self.cache.invalidate(&keys::va_config(va_id)).await;
    }
}
