//! HTTP request handlers.
//!
//! Handlers stay thin: extract the caller and path parameters, call one service and map the
//! result to a response. Every handler is documented with `utoipa::path` and registered in
//! [`router`](crate::server::router).

pub mod pilot;
pub mod pirep;
pub mod user;
pub mod util;
pub mod va;
