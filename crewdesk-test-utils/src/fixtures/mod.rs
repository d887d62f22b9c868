//! Fixture utilities for database rows and HTTP mocks.
//!
//! - `va` - virtual airlines, routes, livery mappings and provider configurations
//! - `user` - users and VA memberships
//! - `live` - Live API mock endpoints
//! - `airtable` - Airtable mock endpoints
//! - `factory` - JSON payloads for flight modes and provider configurations

pub mod airtable;
pub mod factory;
pub mod live;
pub mod user;
pub mod va;
