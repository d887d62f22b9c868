//! Tests for HTTP controller endpoints.
//!
//! Handlers are called directly with their extractors to check the status each outcome
//! maps to; `router` drives the assembled router to cover caller identity extraction and
//! the OpenAPI document.

mod pirep;
mod router;
mod va;

use crewdesk::server::controller::util::caller::CallerIdentity;
use crewdesk_test_utils::prelude::*;

use crate::util::TestContextExt;

const DISCORD_ID: &str = "1001";
const BASE_ID: &str = "appTest";

fn caller() -> CallerIdentity {
    CallerIdentity(DISCORD_ID.to_string())
}
