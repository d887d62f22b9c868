//! Service layer for business logic and orchestration.
//!
//! Services coordinate repositories, the cache, the Live API and the VA's data provider.
//! They borrow their dependencies from [`AppState`](crate::server::model::app::AppState) and
//! are constructed per request.

pub mod flight_mode;
pub mod live_flight;
pub mod livery;
pub mod pilot;
pub mod pirep;
pub mod provider_config;
pub mod user;
pub mod va;
