use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        pirep::{PirepSubmitDto, PirepSubmitResult},
    },
    server::{
        controller::util::caller::CallerIdentity, error::Error, model::app::AppState,
        service::pirep::PirepService,
    },
};

pub static PIREP_TAG: &str = "pirep";

/// Status code for a handled submission outcome
fn submit_status(result: &PirepSubmitResult) -> StatusCode {
    if result.success {
        return StatusCode::CREATED;
    }

    match result.error_type.as_deref() {
        Some("provider_error") => StatusCode::BAD_GATEWAY,
        _ => StatusCode::BAD_REQUEST,
    }
}

/// Submit a PIREP for the caller's current flight
///
/// Expected failures (unknown mode, missing route, unlinked pilot, provider rejection) are
/// returned as a `PirepSubmitResult` with `success: false`.
#[utoipa::path(
    post,
    path = "/api/vas/{va_id}/pireps",
    tag = PIREP_TAG,
    params(("va_id" = i32, Path, description = "Virtual airline ID")),
    request_body = PirepSubmitDto,
    responses(
        (status = 201, description = "PIREP saved to the VA's records", body = PirepSubmitResult),
        (status = 400, description = "PIREP rejected by validation", body = PirepSubmitResult),
        (status = 401, description = "Missing caller identity", body = ErrorDto),
        (status = 404, description = "Virtual airline not found", body = ErrorDto),
        (status = 502, description = "Data provider rejected the PIREP", body = PirepSubmitResult),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn submit_pirep(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(va_id): Path<i32>,
    Json(request): Json<PirepSubmitDto>,
) -> Result<impl IntoResponse, Error> {
    let result = PirepService::new(
        &state.db,
        state.cache.as_ref(),
        &state.live,
        &state.providers,
        &state.logbook_queue,
    )
    .submit(va_id, caller.discord_id(), &request)
    .await?;

    Ok((submit_status(&result), Json(result)))
}
