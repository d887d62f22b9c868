use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, ProviderErrorDto},
        pilot::{PilotRecordDto, PilotSyncDto},
    },
    server::{
        controller::util::caller::CallerIdentity, error::Error, model::app::AppState,
        service::pilot::PilotService,
    },
};

pub static PILOT_TAG: &str = "pilot";

/// Link the caller's VA membership to their pilot record by callsign
#[utoipa::path(
    post,
    path = "/api/vas/{va_id}/pilot/sync",
    tag = PILOT_TAG,
    params(("va_id" = i32, Path, description = "Virtual airline ID")),
    responses(
        (status = 200, description = "Membership linked to a pilot record", body = PilotSyncDto),
        (status = 400, description = "VA has no usable pilot schema", body = ErrorDto),
        (status = 401, description = "Missing caller identity", body = ErrorDto),
        (status = 404, description = "Not a member, or no pilot record has the caller's callsign", body = ErrorDto),
        (status = 502, description = "Data provider request failed", body = ProviderErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn sync_pilot(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(va_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let synced = PilotService::new(
        &state.db,
        state.cache.as_ref(),
        &state.live,
        &state.providers,
    )
    .sync_pilot(va_id, caller.discord_id())
    .await?;

    Ok((StatusCode::OK, Json(synced)))
}

/// Get the caller's pilot record, limited to user-visible fields
#[utoipa::path(
    get,
    path = "/api/vas/{va_id}/pilot",
    tag = PILOT_TAG,
    params(("va_id" = i32, Path, description = "Virtual airline ID")),
    responses(
        (status = 200, description = "The caller's pilot record", body = PilotRecordDto),
        (status = 400, description = "Pilot record not linked yet", body = ErrorDto),
        (status = 401, description = "Missing caller identity", body = ErrorDto),
        (status = 404, description = "Not a member of the VA", body = ErrorDto),
        (status = 502, description = "Data provider request failed", body = ProviderErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_pilot(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(va_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let record = PilotService::new(
        &state.db,
        state.cache.as_ref(),
        &state.live,
        &state.providers,
    )
    .get_pilot_record(va_id, caller.discord_id())
    .await?;

    Ok((StatusCode::OK, Json(record)))
}
