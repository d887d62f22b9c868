//! DTOs exchanged with HTTP clients.

pub mod api;
pub mod flight;
pub mod pilot;
pub mod pirep;
pub mod provider;
pub mod user;
