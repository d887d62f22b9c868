use sea_orm::DatabaseConnection;

use crate::{
    model::pilot::{PilotRecordDto, PilotSyncDto},
    server::{
        cache::Cache,
        data::user::membership::MembershipRepository,
        error::Error,
        live::LiveApiClient,
        model::{db::MembershipModel, va::VaConfig},
        provider::{
            airtable::escape_formula_value,
            schema::{EntitySchema, EntityType},
            FetchFilters, ProviderConfigData, ProviderRegistry,
        },
        service::{
            provider_config::ProviderConfigService, user::UserService, va::VirtualAirlineService,
        },
    },
};

/// Internal name of the pilot schema field holding the callsign
const CALLSIGN_FIELD: &str = "callsign";

/// Formula matching a pilot record by full (`DAL123VA`) or bare (`123`) callsign
pub fn pilot_callsign_formula(provider_field: &str, va: &VaConfig, callsign: &str) -> String {
    let full = format!("{}{}{}", va.callsign_prefix, callsign, va.callsign_suffix);

    if full == callsign {
        format!("{{{}}} = '{}'", provider_field, escape_formula_value(callsign))
    } else {
        format!(
            "OR({{{field}}} = '{}', {{{field}}} = '{}')",
            escape_formula_value(&full),
            escape_formula_value(callsign),
            field = provider_field
        )
    }
}

/// Links VA members to their records in the VA's data provider.
pub struct PilotService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a dyn Cache,
    live: &'a LiveApiClient,
    providers: &'a ProviderRegistry,
}

impl<'a> PilotService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        cache: &'a dyn Cache,
        live: &'a LiveApiClient,
        providers: &'a ProviderRegistry,
    ) -> Self {
        Self {
            db,
            cache,
            live,
            providers,
        }
    }

    async fn load(
        &self,
        va_id: i32,
        discord_id: &str,
    ) -> Result<(VaConfig, MembershipModel, ProviderConfigData, EntitySchema), Error> {
        let va = VirtualAirlineService::new(self.db, self.cache)
            .get_config(va_id)
            .await?;

        let (_, membership) = UserService::new(self.db, self.cache, self.live)
            .get_membership(discord_id, va_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("You are not a member of {}", va.name)))?;

        let config = ProviderConfigService::new(self.db, self.cache, self.providers)
            .get_active_config(va_id)
            .await?;
        let schema = config.schema(EntityType::Pilot).cloned().ok_or_else(|| {
            Error::Validation(format!("{} has no pilot schema configured", va.name))
        })?;

        Ok((va, membership, config, schema))
    }

    /// Finds the caller's pilot record by callsign and stores its ID on the membership
    ///
    /// # Returns
    /// - `Ok(PilotSyncDto)` - The membership is now linked
    /// - `Err(Error::NotFound)` - Not a member, or no pilot record has the caller's callsign
    /// - `Err(Error::Validation)` - The pilot schema has no callsign field
    /// - `Err(Error::ProviderError)` - The provider request failed
    pub async fn sync_pilot(&self, va_id: i32, discord_id: &str) -> Result<PilotSyncDto, Error> {
        let (va, membership, config, schema) = self.load(va_id, discord_id).await?;

        let callsign_field = schema.get_field_mapping(CALLSIGN_FIELD).ok_or_else(|| {
            Error::Validation(format!(
                "{}'s pilot schema does not map a '{}' field",
                va.name, CALLSIGN_FIELD
            ))
        })?;

        let filters = FetchFilters {
            formula: Some(pilot_callsign_formula(
                &callsign_field.provider_field_name,
                &va,
                &membership.callsign,
            )),
            page_size: Some(2),
            ..Default::default()
        };

        let provider = self.providers.get(&config.provider_type)?;
        let records = provider.fetch_records(&config, &schema, &filters).await?;

        if records.records.len() > 1 {
            tracing::warn!(
                va_id = va_id,
                callsign = %membership.callsign,
                "Multiple pilot records match callsign, linking the first"
            );
        }
        let record = records.records.into_iter().next().ok_or_else(|| {
            Error::NotFound(format!(
                "No pilot record with callsign {} found in {}'s records",
                membership.callsign, va.name
            ))
        })?;

        let membership = MembershipRepository::new(self.db)
            .set_provider_pilot_id(membership, record.id)
            .await?;

        let provider_pilot_id = membership.provider_pilot_id.unwrap_or_default();
        tracing::info!(
            va_id = va_id,
            callsign = %membership.callsign,
            record_id = %provider_pilot_id,
            "Linked pilot record"
        );

        Ok(PilotSyncDto {
            va_id,
            callsign: membership.callsign,
            provider_pilot_id,
        })
    }

    /// The caller's pilot record with only user-visible fields, formatted for display
    pub async fn get_pilot_record(
        &self,
        va_id: i32,
        discord_id: &str,
    ) -> Result<PilotRecordDto, Error> {
        let (va, membership, config, schema) = self.load(va_id, discord_id).await?;

        let record_id = membership.provider_pilot_id.ok_or_else(|| {
            Error::Validation(format!(
                "Your pilot record is not linked to {} yet, sync your pilot first",
                va.name
            ))
        })?;

        let provider = self.providers.get(&config.provider_type)?;
        let record = provider.fetch_record(&config, &schema, &record_id).await?;

        Ok(PilotRecordDto {
            fields: schema.to_user_visible(&record.normalized),
            id: record.id,
        })
    }
}
