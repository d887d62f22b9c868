use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::provider::ProviderConfigDto,
    server::{
        cache::{keys, Cache},
        data::va::provider_config::{ProviderConfigRepository, ValidationStatus},
        error::Error,
        provider::{ProviderConfigData, ProviderRegistry, ValidationResult},
    },
};

pub struct ProviderConfigService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a dyn Cache,
    providers: &'a ProviderRegistry,
}

impl<'a> ProviderConfigService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        cache: &'a dyn Cache,
        providers: &'a ProviderRegistry,
    ) -> Self {
        Self {
            db,
            cache,
            providers,
        }
    }

    /// The VA's active provider configuration, read through the cache
    ///
    /// # Returns
    /// - `Ok(ProviderConfigData)` - Decoded active configuration
    /// - `Err(Error::NotFound)` - The VA has no active provider configuration
    /// - `Err(Error::ConfigError)` - The stored configuration no longer decodes
    pub async fn get_active_config(&self, va_id: i32) -> Result<ProviderConfigData, Error> {
        let db = self.db;

        self.cache
            .get_or_set(
                &keys::provider_config(va_id),
                keys::PROVIDER_CONFIG_TTL,
                move || async move {
                    let stored = ProviderConfigRepository::new(db)
                        .get_active(va_id)
                        .await?
                        .ok_or_else(|| {
                            Error::NotFound(format!(
                                "Virtual airline {} has no data provider configured",
                                va_id
                            ))
                        })?;

                    Ok(ProviderConfigData::parse(stored.config_data)?)
                },
            )
            .await
    }

    /// Validates a configuration payload and stores it as the VA's new active version.
    ///
    /// The previous version is kept but deactivated, and the new one starts as `pending`
    /// until [`validate_connectivity`](Self::validate_connectivity) runs.
    ///
    /// # Returns
    /// - `Ok(ProviderConfigDto)` - The stored version
    /// - `Err(Error::ConfigError)` - Payload failed validation; nothing was written
    pub async fn save_or_update(
        &self,
        va_id: i32,
        raw: serde_json::Value,
        features_enabled: Vec<String>,
        actor: Option<String>,
    ) -> Result<ProviderConfigDto, Error> {
        let config = ProviderConfigData::parse(raw)?;

        let txn = self.db.begin().await?;
        let stored = ProviderConfigRepository::new(&txn)
            .insert_version(
                va_id,
                &config.provider_type,
                serde_json::to_value(&config)?,
                serde_json::to_value(&features_enabled)?,
                actor,
            )
            .await?;
        txn.commit().await?;

        self.cache.invalidate(&keys::provider_config(va_id)).await;

        tracing::info!(
            va_id = va_id,
            provider_type = %stored.provider_type,
            version = stored.config_version,
            "Saved data provider configuration"
        );

        Ok(stored.into())
    }

    /// Runs the provider's connectivity check against the active configuration and records
    /// the outcome as the version's validation status
    pub async fn validate_connectivity(&self, va_id: i32) -> Result<ValidationResult, Error> {
        let repo = ProviderConfigRepository::new(self.db);

        let stored = repo.get_active(va_id).await?.ok_or_else(|| {
            Error::NotFound(format!(
                "Virtual airline {} has no data provider configured",
                va_id
            ))
        })?;
        let config = ProviderConfigData::parse(stored.config_data.clone())?;
        let provider = self.providers.get(&config.provider_type)?;

        let result = provider.validate_config(&config).await;
        let status = if result.success {
            ValidationStatus::Valid
        } else {
            ValidationStatus::Invalid
        };
        repo.set_validation_status(stored, status).await?;

        tracing::info!(
            va_id = va_id,
            success = result.success,
            failed_phases = ?result.failed_phases,
            duration_ms = result.duration_ms,
            "Validated data provider configuration"
        );

        Ok(result)
    }
}
