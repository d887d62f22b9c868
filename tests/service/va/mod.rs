//! Tests for VA-scoped services: flight modes, eligibility, live rosters and provider
//! configuration.

mod eligibility;
mod flight_modes;
mod live_flights;
mod provider_config;

use super::*;
