use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        api::ErrorDto,
        user::{RegisterUserDto, UserDto},
    },
    server::{
        controller::util::caller::CallerIdentity,
        error::Error,
        live::model::FlightHistoryPage,
        model::app::AppState,
        service::{live_flight::LiveFlightService, user::UserService},
    },
};

pub static USER_TAG: &str = "user";

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct FlightHistoryParams {
    /// Page number, starting at 1
    pub page: Option<u32>,
}

/// Register the caller and link their Infinite Flight Community account
#[utoipa::path(
    post,
    path = "/api/users/register",
    tag = USER_TAG,
    request_body = RegisterUserDto,
    responses(
        (status = 200, description = "Registered or updated user", body = UserDto),
        (status = 400, description = "Empty username", body = ErrorDto),
        (status = 401, description = "Missing caller identity", body = ErrorDto),
        (status = 404, description = "No Infinite Flight Community user with that name", body = ErrorDto),
        (status = 502, description = "Live API unavailable", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register_user(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Json(request): Json<RegisterUserDto>,
) -> Result<impl IntoResponse, Error> {
    let user = UserService::new(&state.db, state.cache.as_ref(), &state.live)
        .register(caller.discord_id(), &request.ifc_username)
        .await?;

    Ok((StatusCode::OK, Json(user)))
}

/// Get a page of the caller's Infinite Flight flight history
#[utoipa::path(
    get,
    path = "/api/users/me/flights",
    tag = USER_TAG,
    params(FlightHistoryParams),
    responses(
        (status = 200, description = "One page of flight history", body = FlightHistoryPage),
        (status = 400, description = "Caller has no linked Infinite Flight account", body = ErrorDto),
        (status = 401, description = "Missing caller identity", body = ErrorDto),
        (status = 404, description = "Caller is not registered", body = ErrorDto),
        (status = 502, description = "Live API unavailable", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_flight_history(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Query(params): Query<FlightHistoryParams>,
) -> Result<impl IntoResponse, Error> {
    let user = UserService::new(&state.db, state.cache.as_ref(), &state.live)
        .get_by_discord_id(caller.discord_id())
        .await?;

    let Some(ifc_user_id) = user.ifc_user_id else {
        return Err(Error::Validation(
            "Register your Infinite Flight Community username first".to_string(),
        ));
    };

    let history = LiveFlightService::new(
        state.cache.as_ref(),
        &state.live,
        state.flight_plan_concurrency,
    )
    .get_flight_history(&ifc_user_id, params.page.unwrap_or(1))
    .await?;

    Ok((StatusCode::OK, Json(history)))
}
