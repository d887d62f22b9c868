//! PIREP submission pipeline.
//!
//! A submission runs through these steps in order, each a precondition of the next:
//!
//! 1. Mode resolution against the VA's flight modes
//! 2. Required field validation (flight time always, others per mode)
//! 3. Route resolution, from the mode's auto route or the pilot's selection
//! 4. Pilot resolution: VA membership linked to a provider pilot record
//! 5. Current flight lookup on the Live API (best effort)
//! 6. Livery to aircraft/airline names (best effort)
//! 7. Provider configuration and PIREP schema
//! 8. Record construction from the schema's field mappings
//! 9. A single provider write
//!
//! Steps 1-4 and 7 stop the pipeline with a `validation_error`; steps 5 and 6 fall back to
//! defaults. Expected failures are returned as a [`PirepSubmitResult`], only infrastructure
//! failures (database, cache backend) surface as [`Error`].

use chrono::{NaiveDate, Utc};
use sea_orm::DatabaseConnection;
use serde_json::{json, Map, Value};

use crate::{
    model::{
        pirep::{PirepSubmitDto, PirepSubmitResult},
        user::UserDto,
    },
    server::{
        cache::Cache,
        data::va::route::RouteRepository,
        error::{pirep::PirepError, Error},
        live::LiveApiClient,
        model::{
            db::{MembershipModel, RouteModel},
            flight_mode::FlightModeConfig,
            va::VaConfig,
            worker::LogbookJob,
        },
        provider::{
            schema::{EntitySchema, EntityType},
            ProviderConfigData, ProviderRegistry,
        },
        service::{
            live_flight::{CurrentFlight, LiveFlightService},
            livery::{LiveryNames, LiveryService},
            provider_config::ProviderConfigService,
            user::UserService,
            va::VirtualAirlineService,
        },
        util::time::{format_hhmm, parse_flight_time, scale_seconds},
        worker::LogbookQueue,
    },
};

pub const BOT_METADATA_START: &str = "--- Bot Metadata ---";
pub const BOT_METADATA_END: &str = "--- End Bot Metadata ---";

/// Internal name of the field the bot metadata block may be appended to
const REMARKS_FIELD: &str = "remarks";

/// Mode inputs that may be marked required, with the label used in messages
const OPTIONAL_INPUTS: [(&str, &str); 3] = [
    ("fuel_kg", "Fuel (kg)"),
    ("cargo_kg", "Cargo (kg)"),
    ("passengers", "Passengers"),
];

/// Why a submission stopped
enum SubmitFailure {
    /// Expected outcome reported to the pilot
    Rejected(PirepError),
    /// Infrastructure failure
    Internal(Error),
}

impl From<PirepError> for SubmitFailure {
    fn from(err: PirepError) -> Self {
        Self::Rejected(err)
    }
}

impl From<Error> for SubmitFailure {
    fn from(err: Error) -> Self {
        Self::Internal(err)
    }
}

impl From<sea_orm::DbErr> for SubmitFailure {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Internal(err.into())
    }
}

/// Everything the record builder needs, resolved by the earlier steps
#[derive(Debug, Clone, PartialEq)]
pub struct PirepRecordInput {
    pub pilot_record_id: String,
    pub pilot_username: String,
    pub aircraft: String,
    pub airline: String,
    pub route_record_id: String,
    pub mode_display_name: String,
    /// Flight time in seconds after the mode multiplier was applied
    pub credited_seconds: u64,
    pub date: NaiveDate,
    pub fuel_kg: Option<f64>,
    pub cargo_kg: Option<f64>,
    pub passengers: Option<i64>,
    pub remarks: Option<String>,
    pub metadata: BotMetadata,
}

/// Machine-derived facts recorded alongside the pilot's remarks
#[derive(Debug, Clone, PartialEq)]
pub struct BotMetadata {
    pub actual_seconds: u64,
    pub multiplier: f64,
    pub route: Option<String>,
    pub aircraft: String,
    pub livery: String,
    /// Raw Live API livery ID, kept so unmapped liveries can be traced
    pub livery_id: Option<String>,
    pub altitude: Option<f64>,
    pub speed: Option<f64>,
}

impl BotMetadata {
    /// Renders the delimited block appended to the remarks field
    pub fn render(&self) -> String {
        let unknown = || "Unknown".to_string();

        [
            BOT_METADATA_START.to_string(),
            format!("Actual Flight Time: {}", format_hhmm(self.actual_seconds)),
            format!("Multiplier: {}x", self.multiplier),
            format!("Route: {}", self.route.clone().unwrap_or_else(unknown)),
            format!("Aircraft: {}", self.aircraft),
            match &self.livery_id {
                Some(id) => format!("Livery: {} ({})", self.livery, id),
                None => format!("Livery: {}", self.livery),
            },
            format!(
                "Altitude: {}",
                self.altitude
                    .map(|a| format!("{:.0} ft", a))
                    .unwrap_or_else(unknown)
            ),
            format!(
                "Speed: {}",
                self.speed
                    .map(|s| format!("{:.0} kts", s))
                    .unwrap_or_else(unknown)
            ),
            BOT_METADATA_END.to_string(),
        ]
        .join("\n")
    }
}

/// Builds the provider-field-keyed record for a PIREP.
///
/// Only fields mapped in the schema are written, each coerced to its configured data type.
/// The bot metadata block is appended to the remarks only when the schema flags the
/// remarks field as its carrier.
pub fn build_pirep_record(schema: &EntitySchema, input: &PirepRecordInput) -> Map<String, Value> {
    let carries_metadata = schema
        .bot_metadata_field()
        .is_some_and(|field| field.internal_name == REMARKS_FIELD);

    let remarks = input
        .remarks
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string);
    let remarks = if carries_metadata {
        let block = input.metadata.render();
        Some(match remarks {
            Some(remarks) => format!("{}\n\n{}", remarks, block),
            None => block,
        })
    } else {
        remarks
    };

    let values: [(&str, Option<Value>); 12] = [
        ("pilot", Some(json!([input.pilot_record_id]))),
        ("pilot_username", Some(json!(input.pilot_username))),
        ("aircraft", Some(json!(input.aircraft))),
        ("airline", Some(json!(input.airline))),
        ("route", Some(json!([input.route_record_id]))),
        ("mode", Some(json!(input.mode_display_name))),
        ("flight_time", Some(json!(input.credited_seconds))),
        ("date", Some(json!(input.date.format("%Y-%m-%d").to_string()))),
        ("fuel_kg", input.fuel_kg.map(|v| json!(v))),
        ("cargo_kg", input.cargo_kg.map(|v| json!(v))),
        ("passengers", input.passengers.map(|v| json!(v))),
        (REMARKS_FIELD, remarks.map(Value::String)),
    ];

    values
        .into_iter()
        .filter_map(|(internal_name, value)| {
            let field = schema.get_field_mapping(internal_name)?;
            let value = value?;
            Some((field.provider_field_name.clone(), field.coerce(value)))
        })
        .collect()
}

pub struct PirepService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a dyn Cache,
    live: &'a LiveApiClient,
    providers: &'a ProviderRegistry,
    logbook_queue: &'a LogbookQueue,
}

impl<'a> PirepService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        cache: &'a dyn Cache,
        live: &'a LiveApiClient,
        providers: &'a ProviderRegistry,
        logbook_queue: &'a LogbookQueue,
    ) -> Self {
        Self {
            db,
            cache,
            live,
            providers,
            logbook_queue,
        }
    }

    /// Submits a PIREP on behalf of the caller.
    ///
    /// # Returns
    /// - `Ok(PirepSubmitResult)` - Success with the new record ID, or a handled
    ///   `validation_error`/`provider_error` failure
    /// - `Err(Error::NotFound)` - The VA does not exist
    /// - `Err(Error)` - Database or configuration failure
    pub async fn submit(
        &self,
        va_id: i32,
        discord_id: &str,
        request: &PirepSubmitDto,
    ) -> Result<PirepSubmitResult, Error> {
        let va = VirtualAirlineService::new(self.db, self.cache)
            .get_config(va_id)
            .await?;

        match self.run(&va, discord_id, request).await {
            Ok(pirep_id) => {
                tracing::info!(va_id = va_id, mode = %request.mode, pirep_id = %pirep_id, "PIREP submitted");
                Ok(PirepSubmitResult::success(pirep_id))
            }
            Err(SubmitFailure::Rejected(err)) => {
                tracing::info!(
                    va_id = va_id,
                    mode = %request.mode,
                    error_type = err.error_type(),
                    "PIREP rejected: {}",
                    err
                );
                Ok(PirepSubmitResult::failure(&err))
            }
            Err(SubmitFailure::Internal(err)) => Err(err),
        }
    }

    async fn run(
        &self,
        va: &VaConfig,
        discord_id: &str,
        request: &PirepSubmitDto,
    ) -> Result<String, SubmitFailure> {
        let mode = resolve_mode(va, &request.mode)?;
        tracing::debug!(va_id = va.id, step = "mode", "Resolved mode {}", request.mode);

        let actual_seconds = validate_required_fields(mode, request)?;
        tracing::debug!(va_id = va.id, step = "fields", "Required fields present");

        let route = self.resolve_route(va, mode, request).await?;
        tracing::debug!(va_id = va.id, step = "route", "Resolved route {}", route.name);

        let (user, membership, pilot_record_id) = self.resolve_pilot(va, discord_id).await?;
        tracing::debug!(va_id = va.id, step = "pilot", "Resolved pilot {}", membership.callsign);

        let current = self.find_current_flight(va, &membership.callsign).await;
        let livery = match &current {
            Some(current) if !current.flight.livery_id.is_empty() => {
                LiveryService::new(self.db, self.cache)
                    .get_names_or_default(va.id, &current.flight.livery_id)
                    .await
            }
            _ => LiveryNames::default(),
        };

        let (config, schema) = self.load_pirep_schema(va).await?;
        tracing::debug!(va_id = va.id, step = "schema", "Loaded PIREP schema");

        let multiplier = mode.multiplier();
        let input = PirepRecordInput {
            pilot_record_id,
            pilot_username: user
                .ifc_username
                .clone()
                .unwrap_or_else(|| membership.callsign.clone()),
            aircraft: livery.aircraft.clone(),
            airline: livery.airline.clone(),
            route_record_id: route.provider_record_id.clone(),
            mode_display_name: mode.display_name.clone(),
            credited_seconds: scale_seconds(actual_seconds, multiplier),
            date: Utc::now().date_naive(),
            fuel_kg: request.fuel_kg,
            cargo_kg: request.cargo_kg,
            passengers: request.passengers,
            remarks: request.remarks.clone(),
            metadata: BotMetadata {
                actual_seconds,
                multiplier,
                route: current.as_ref().and_then(CurrentFlight::route),
                aircraft: livery.aircraft,
                livery: livery.airline,
                livery_id: current
                    .as_ref()
                    .map(|c| c.flight.livery_id.clone())
                    .filter(|id| !id.is_empty()),
                altitude: current.as_ref().map(|c| c.flight.altitude),
                speed: current.as_ref().map(|c| c.flight.speed),
            },
        };
        let fields = build_pirep_record(&schema, &input);

        let provider = self
            .providers
            .get(&config.provider_type)
            .map_err(PirepError::from)?;
        let pirep_id = provider
            .submit_record(&config, &schema, fields)
            .await
            .map_err(PirepError::from)?;

        if let Some(ifc_user_id) = user.ifc_user_id {
            self.logbook_queue
                .try_enqueue(LogbookJob::RefreshFlightHistory {
                    ifc_user_id,
                    pages: 1,
                });
        }

        Ok(pirep_id)
    }

    async fn resolve_route(
        &self,
        va: &VaConfig,
        mode: &FlightModeConfig,
        request: &PirepSubmitDto,
    ) -> Result<RouteModel, SubmitFailure> {
        let route_name = if mode.requires_route_selection {
            request
                .route_id
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .ok_or_else(|| {
                    PirepError::validation(format!(
                        "Route selection is required for {}, please select a route",
                        mode.display_name
                    ))
                })?
        } else {
            mode.auto_route
                .as_ref()
                .map(|auto| auto.route_name.trim())
                .filter(|name| !name.is_empty())
                .ok_or_else(|| {
                    PirepError::validation(format!(
                        "{} has no route configured, contact VA staff",
                        mode.display_name
                    ))
                })?
        };

        let route = RouteRepository::new(self.db)
            .find_by_name(va.id, route_name)
            .await?
            .ok_or_else(|| PirepError::validation(format!("Route {} not found", route_name)))?;

        Ok(route)
    }

    async fn resolve_pilot(
        &self,
        va: &VaConfig,
        discord_id: &str,
    ) -> Result<(UserDto, MembershipModel, String), SubmitFailure> {
        let (user, membership) = UserService::new(self.db, self.cache, self.live)
            .get_membership(discord_id, va.id)
            .await?
            .ok_or_else(|| PirepError::validation(format!("You are not a member of {}", va.name)))?;

        let pilot_record_id = membership.provider_pilot_id.clone().ok_or_else(|| {
            PirepError::validation(format!(
                "Pilot record not linked to {}'s records yet, ask VA staff to sync your pilot",
                va.name
            ))
        })?;

        Ok((user, membership, pilot_record_id))
    }

    async fn find_current_flight(&self, va: &VaConfig, callsign: &str) -> Option<CurrentFlight> {
        match LiveFlightService::new(self.cache, self.live, 1)
            .find_current_flight(va, callsign)
            .await
        {
            Ok(current) => Some(current),
            Err(e) => {
                tracing::warn!(
                    va_id = va.id,
                    step = "current_flight",
                    "Continuing without live flight details: {}",
                    e
                );
                None
            }
        }
    }

    async fn load_pirep_schema(
        &self,
        va: &VaConfig,
    ) -> Result<(ProviderConfigData, EntitySchema), SubmitFailure> {
        let config = match ProviderConfigService::new(self.db, self.cache, self.providers)
            .get_active_config(va.id)
            .await
        {
            Ok(config) => config,
            Err(Error::NotFound(_)) => {
                return Err(PirepError::validation(format!(
                    "{} has no data provider configured, contact VA staff",
                    va.name
                ))
                .into())
            }
            Err(e) => return Err(e.into()),
        };

        let schema = config.schema(EntityType::Pirep).cloned().ok_or_else(|| {
            PirepError::validation(format!(
                "{} has no PIREP schema configured, contact VA staff",
                va.name
            ))
        })?;

        Ok((config, schema))
    }
}

fn resolve_mode<'v>(va: &'v VaConfig, mode_id: &str) -> Result<&'v FlightModeConfig, PirepError> {
    match va.flight_modes.get(mode_id) {
        Some(mode) if mode.enabled => Ok(mode),
        Some(mode) => Err(PirepError::validation(format!(
            "{} is currently disabled",
            mode.display_name
        ))),
        None => Err(PirepError::validation(format!(
            "Unknown flight mode {}",
            mode_id
        ))),
    }
}

/// Checks required inputs and returns the parsed flight time in seconds
fn validate_required_fields(
    mode: &FlightModeConfig,
    request: &PirepSubmitDto,
) -> Result<u64, PirepError> {
    let raw = request
        .flight_time
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| PirepError::validation("Flight time is required"))?;
    let seconds = parse_flight_time(raw).ok_or_else(|| {
        PirepError::validation(format!("Flight time {} is not a valid HH:MM duration", raw))
    })?;

    for (name, label) in OPTIONAL_INPUTS {
        let present = match name {
            "fuel_kg" => request.fuel_kg.is_some(),
            "cargo_kg" => request.cargo_kg.is_some(),
            _ => request.passengers.is_some(),
        };

        if mode.is_required(name) && !present {
            let label = mode
                .field(name)
                .map(|field| field.label.as_str())
                .filter(|label| !label.is_empty())
                .unwrap_or(label);
            return Err(PirepError::validation(format!("{} is required", label)));
        }
    }

    Ok(seconds)
}
