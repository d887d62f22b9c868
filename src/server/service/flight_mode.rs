use sea_orm::DatabaseConnection;

use crate::{
    model::flight::EligibilityDto,
    server::{
        cache::Cache,
        data::va::virtual_airline::VirtualAirlineRepository,
        error::Error,
        live::LiveApiClient,
        model::flight_mode::{FlightModesConfig, RouteValidation, VALIDATION_MODE_ANY},
        service::{live_flight::LiveFlightService, user::UserService, va::VirtualAirlineService},
    },
};

/// Result of checking a route against a mode's route policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteCheck {
    pub valid: bool,
    pub error_message: Option<String>,
}

impl RouteCheck {
    fn valid() -> Self {
        Self {
            valid: true,
            error_message: None,
        }
    }

    fn invalid(message: String) -> Self {
        Self {
            valid: false,
            error_message: Some(message),
        }
    }
}

/// Checks the pilot's current route against a mode's route policy.
///
/// Evaluated in order: `allowAnyCurrentRoute`, an empty allow-list, then `validationMode`
/// where anything other than `any` behaves as `exact_match`.
pub fn validate_flight_for_mode(
    current_route: Option<&str>,
    validation: &RouteValidation,
) -> RouteCheck {
    if validation.allow_any_current_route || validation.allowed_routes.is_empty() {
        return RouteCheck::valid();
    }

    if validation.validation_mode == VALIDATION_MODE_ANY {
        return RouteCheck::valid();
    }

    match current_route {
        Some(route) if validation.allowed_routes.iter().any(|r| r == route) => RouteCheck::valid(),
        Some(route) => RouteCheck::invalid(format!(
            "Route {} is not allowed for this mode. Allowed routes: {}",
            route,
            validation.allowed_routes.join(", ")
        )),
        None => RouteCheck::invalid(format!(
            "Your current route could not be determined. Allowed routes: {}",
            validation.allowed_routes.join(", ")
        )),
    }
}

pub struct FlightModeService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a dyn Cache,
    live: &'a LiveApiClient,
}

impl<'a> FlightModeService<'a> {
    pub fn new(db: &'a DatabaseConnection, cache: &'a dyn Cache, live: &'a LiveApiClient) -> Self {
        Self { db, cache, live }
    }

    /// Validates and stores a VA's flight modes configuration.
    ///
    /// Nothing is written unless the whole payload passes validation. The cached VA
    /// configuration is invalidated after the write.
    ///
    /// # Returns
    /// - `Ok(FlightModesConfig)` - The stored configuration
    /// - `Err(Error::ConfigError)` - Payload failed validation, with every problem listed
    /// - `Err(Error::NotFound)` - No VA with this ID exists
    pub async fn save_config(
        &self,
        va_id: i32,
        raw: serde_json::Value,
    ) -> Result<FlightModesConfig, Error> {
        let config = FlightModesConfig::parse(raw)?;

        VirtualAirlineRepository::new(self.db)
            .update_flight_modes_config(va_id, serde_json::to_value(&config)?)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Virtual airline {} not found", va_id)))?;

        VirtualAirlineService::new(self.db, self.cache)
            .invalidate(va_id)
            .await;

        tracing::info!(va_id = va_id, modes = config.0.len(), "Saved flight modes configuration");

        Ok(config)
    }

    /// Checks whether the caller's current live flight may be filed under a mode
    ///
    /// # Returns
    /// - `Ok(EligibilityDto)` - Check result; unknown or disabled modes are reported invalid
    /// - `Err(Error::NotFound)` - VA or membership missing, or the caller is not flying
    pub async fn check_eligibility(
        &self,
        va_id: i32,
        discord_id: &str,
        mode_id: &str,
    ) -> Result<EligibilityDto, Error> {
        let va = VirtualAirlineService::new(self.db, self.cache)
            .get_config(va_id)
            .await?;

        let mode = match va.flight_modes.get(mode_id) {
            Some(mode) if mode.enabled => mode,
            Some(mode) => {
                let message = format!("{} is currently disabled", mode.display_name);
                return Ok(ineligible(mode_id, message));
            }
            None => return Ok(ineligible(mode_id, format!("Unknown flight mode {}", mode_id))),
        };

        let (_, membership) = UserService::new(self.db, self.cache, self.live)
            .get_membership(discord_id, va_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("You are not a member of {}", va.name)))?;

        let current = LiveFlightService::new(self.cache, self.live, 1)
            .find_current_flight(&va, &membership.callsign)
            .await?;
        let route = current.route();
        let check = validate_flight_for_mode(route.as_deref(), &mode.validations);

        Ok(EligibilityDto {
            mode: mode_id.to_string(),
            valid: check.valid,
            current_route: route.unwrap_or_default(),
            error_message: check.error_message,
        })
    }
}

fn ineligible(mode_id: &str, message: String) -> EligibilityDto {
    EligibilityDto {
        mode: mode_id.to_string(),
        valid: false,
        current_route: String::new(),
        error_message: Some(message),
    }
}
