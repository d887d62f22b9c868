//! Service integration tests against an in-memory database and the mock server.

mod pilot;
mod pirep;
mod user;
mod va;

use crewdesk_test_utils::prelude::*;

use crate::util::TestContextExt;

/// Discord ID of the pilot used across service tests
const DISCORD_ID: &str = "1001";
/// Airtable base of [`factory::airtable_config`] in service tests
const BASE_ID: &str = "appTest";
