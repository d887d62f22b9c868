use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ConfigErrorDto, ErrorDto, ProviderErrorDto},
        flight::{EligibilityDto, LiveFlightDto},
        provider::{ProviderConfigDto, SaveProviderConfigDto},
    },
    server::{
        controller::util::caller::CallerIdentity,
        error::Error,
        model::app::AppState,
        provider::ValidationResult,
        service::{
            flight_mode::FlightModeService, live_flight::LiveFlightService,
            provider_config::ProviderConfigService, va::VirtualAirlineService,
        },
    },
};

pub static VA_TAG: &str = "virtual airline";

/// Check whether the caller's current flight may be filed under a flight mode
#[utoipa::path(
    get,
    path = "/api/vas/{va_id}/modes/{mode_id}/eligibility",
    tag = VA_TAG,
    params(
        ("va_id" = i32, Path, description = "Virtual airline ID"),
        ("mode_id" = String, Path, description = "Flight mode ID")
    ),
    responses(
        (status = 200, description = "Eligibility of the caller's current flight", body = EligibilityDto),
        (status = 401, description = "Missing caller identity", body = ErrorDto),
        (status = 404, description = "VA or membership not found, or the caller is not flying", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn check_eligibility(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path((va_id, mode_id)): Path<(i32, String)>,
) -> Result<impl IntoResponse, Error> {
    let eligibility = FlightModeService::new(&state.db, state.cache.as_ref(), &state.live)
        .check_eligibility(va_id, caller.discord_id(), &mode_id)
        .await?;

    Ok((StatusCode::OK, Json(eligibility)))
}

/// Replace the VA's flight modes configuration
///
/// The payload is a map of mode ID to mode configuration. It is validated as a whole and
/// nothing is stored when any mode is malformed.
#[utoipa::path(
    put,
    path = "/api/vas/{va_id}/flight-modes",
    tag = VA_TAG,
    params(("va_id" = i32, Path, description = "Virtual airline ID")),
    request_body(content = Object, description = "Flight modes keyed by mode ID"),
    responses(
        (status = 200, description = "Stored flight modes configuration", body = Object),
        (status = 401, description = "Missing caller identity", body = ErrorDto),
        (status = 404, description = "Virtual airline not found", body = ErrorDto),
        (status = 422, description = "Malformed flight modes configuration", body = ConfigErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn save_flight_modes(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(va_id): Path<i32>,
    Json(payload): Json<serde_json::Value>,
) -> Result<impl IntoResponse, Error> {
    tracing::debug!(va_id = va_id, caller = %caller.discord_id(), "Saving flight modes");

    let config = FlightModeService::new(&state.db, state.cache.as_ref(), &state.live)
        .save_config(va_id, payload)
        .await?;

    Ok((StatusCode::OK, Json(config)))
}

/// Store a new version of the VA's data provider configuration
#[utoipa::path(
    put,
    path = "/api/vas/{va_id}/provider-config",
    tag = VA_TAG,
    params(("va_id" = i32, Path, description = "Virtual airline ID")),
    request_body = SaveProviderConfigDto,
    responses(
        (status = 200, description = "Stored configuration version", body = ProviderConfigDto),
        (status = 401, description = "Missing caller identity", body = ErrorDto),
        (status = 422, description = "Malformed provider configuration", body = ConfigErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn save_provider_config(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(va_id): Path<i32>,
    Json(payload): Json<SaveProviderConfigDto>,
) -> Result<impl IntoResponse, Error> {
    let stored = ProviderConfigService::new(&state.db, state.cache.as_ref(), &state.providers)
        .save_or_update(
            va_id,
            payload.config,
            payload.features_enabled,
            Some(caller.0),
        )
        .await?;

    Ok((StatusCode::OK, Json(stored)))
}

/// Test the VA's active provider configuration against the provider
///
/// A failed check is still a 200; the result lists which phases failed and why.
#[utoipa::path(
    post,
    path = "/api/vas/{va_id}/provider-config/validate",
    tag = VA_TAG,
    params(("va_id" = i32, Path, description = "Virtual airline ID")),
    responses(
        (status = 200, description = "Connectivity check result", body = ValidationResult),
        (status = 401, description = "Missing caller identity", body = ErrorDto),
        (status = 404, description = "No provider configured", body = ErrorDto),
        (status = 502, description = "Provider type unavailable", body = ProviderErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn validate_provider_config(
    State(state): State<AppState>,
    _caller: CallerIdentity,
    Path(va_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let result = ProviderConfigService::new(&state.db, state.cache.as_ref(), &state.providers)
        .validate_connectivity(va_id)
        .await?;

    Ok((StatusCode::OK, Json(result)))
}

/// List the VA's pilots currently flying on its game server
#[utoipa::path(
    get,
    path = "/api/vas/{va_id}/live-flights",
    tag = VA_TAG,
    params(("va_id" = i32, Path, description = "Virtual airline ID")),
    responses(
        (status = 200, description = "VA flights with their flight plan routes", body = Vec<LiveFlightDto>),
        (status = 400, description = "VA has no callsign pattern or game server", body = ErrorDto),
        (status = 404, description = "Virtual airline or game server not found", body = ErrorDto),
        (status = 502, description = "Live API unavailable", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_live_flights(
    State(state): State<AppState>,
    Path(va_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let va = VirtualAirlineService::new(&state.db, state.cache.as_ref())
        .get_config(va_id)
        .await?;

    let flights = LiveFlightService::new(
        state.cache.as_ref(),
        &state.live,
        state.flight_plan_concurrency,
    )
    .get_va_live_flights(&va)
    .await?;

    Ok((StatusCode::OK, Json(flights)))
}
