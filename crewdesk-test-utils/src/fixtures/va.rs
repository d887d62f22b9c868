use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};
use serde_json::{json, Value};

use crate::{error::TestError, TestContext};

/// Callsign prefix used by [`VaFixtures::insert_va`]
pub static TEST_CALLSIGN_PREFIX: &str = "DAL";
/// Live API session name used by [`VaFixtures::insert_va`]
pub static TEST_GAME_SERVER: &str = "Expert";

impl TestContext {
    pub fn va<'a>(&'a mut self) -> VaFixtures<'a> {
        VaFixtures { setup: self }
    }
}

pub struct VaFixtures<'a> {
    setup: &'a mut TestContext,
}

impl<'a> VaFixtures<'a> {
    /// Inserts "Delta Virtual" with callsign prefix `DAL` flying on the `Expert` server
    pub async fn insert_va(
        &self,
        discord_server_id: &str,
        flight_modes: Option<Value>,
    ) -> Result<entity::virtual_airline::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::VirtualAirline::insert(entity::virtual_airline::ActiveModel {
                name: ActiveValue::Set("Delta Virtual".to_string()),
                discord_server_id: ActiveValue::Set(discord_server_id.to_string()),
                callsign_prefix: ActiveValue::Set(Some(TEST_CALLSIGN_PREFIX.to_string())),
                callsign_suffix: ActiveValue::Set(None),
                game_server: ActiveValue::Set(Some(TEST_GAME_SERVER.to_string())),
                flight_modes_config: ActiveValue::Set(flight_modes),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn insert_route(
        &self,
        va_id: i32,
        name: &str,
        provider_record_id: &str,
    ) -> Result<entity::route::Model, TestError> {
        Ok(entity::prelude::Route::insert(entity::route::ActiveModel {
            va_id: ActiveValue::Set(va_id),
            name: ActiveValue::Set(name.to_string()),
            provider_record_id: ActiveValue::Set(provider_record_id.to_string()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    pub async fn insert_livery_mapping(
        &self,
        va_id: i32,
        livery_id: &str,
        aircraft_name: &str,
        airline_name: &str,
    ) -> Result<entity::livery_mapping::Model, TestError> {
        Ok(
            entity::prelude::LiveryMapping::insert(entity::livery_mapping::ActiveModel {
                va_id: ActiveValue::Set(va_id),
                livery_id: ActiveValue::Set(livery_id.to_string()),
                aircraft_id: ActiveValue::Set(None),
                aircraft_name: ActiveValue::Set(aircraft_name.to_string()),
                airline_name: ActiveValue::Set(airline_name.to_string()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Inserts an active, pending version 1 of a provider configuration
    pub async fn insert_provider_config(
        &self,
        va_id: i32,
        config_data: Value,
    ) -> Result<entity::data_provider_config::Model, TestError> {
        let now = Utc::now().naive_utc();
        let provider_type = config_data
            .get("providerType")
            .and_then(Value::as_str)
            .unwrap_or("airtable")
            .to_string();

        Ok(entity::prelude::DataProviderConfig::insert(
            entity::data_provider_config::ActiveModel {
                va_id: ActiveValue::Set(va_id),
                provider_type: ActiveValue::Set(provider_type),
                config_version: ActiveValue::Set(1),
                is_active: ActiveValue::Set(true),
                validation_status: ActiveValue::Set("pending".to_string()),
                config_data: ActiveValue::Set(config_data),
                features_enabled: ActiveValue::Set(json!([])),
                created_by: ActiveValue::Set(None),
                updated_by: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            },
        )
        .exec_with_returning(&self.setup.db)
        .await?)
    }
}
