//! HTTP routing and OpenAPI documentation configuration.
//!
//! All API endpoints are registered here with their OpenAPI specifications, and Swagger UI
//! serves interactive documentation at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// # Registered Endpoints
/// - `POST /api/vas/{va_id}/pireps` - Submit a PIREP
/// - `GET /api/vas/{va_id}/modes/{mode_id}/eligibility` - Check the current flight against a mode
/// - `PUT /api/vas/{va_id}/flight-modes` - Replace the VA's flight modes
/// - `PUT /api/vas/{va_id}/provider-config` - Store a provider configuration version
/// - `POST /api/vas/{va_id}/provider-config/validate` - Test provider connectivity
/// - `GET /api/vas/{va_id}/live-flights` - VA pilots currently flying
/// - `POST /api/vas/{va_id}/pilot/sync` - Link the caller to their pilot record
/// - `GET /api/vas/{va_id}/pilot` - The caller's pilot record
/// - `POST /api/users/register` - Link the caller's Infinite Flight Community account
/// - `GET /api/users/me/flights` - The caller's flight history
///
/// The OpenAPI document is served at `/api/docs/openapi.json`.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Crewdesk", description = "Crewdesk API"), tags(
        (name = controller::pirep::PIREP_TAG, description = "PIREP submission"),
        (name = controller::va::VA_TAG, description = "Virtual airline configuration and live flights"),
        (name = controller::pilot::PILOT_TAG, description = "Pilot record linking"),
        (name = controller::user::USER_TAG, description = "User registration and flight history"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::pirep::submit_pirep))
        .routes(routes!(controller::va::check_eligibility))
        .routes(routes!(controller::va::save_flight_modes))
        .routes(routes!(controller::va::save_provider_config))
        .routes(routes!(controller::va::validate_provider_config))
        .routes(routes!(controller::va::get_live_flights))
        .routes(routes!(controller::pilot::sync_pilot))
        .routes(routes!(controller::pilot::get_pilot))
        .routes(routes!(controller::user::register_user))
        .routes(routes!(controller::user::get_flight_history))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
