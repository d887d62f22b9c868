//! Tests for PilotService.

mod get_pilot_record;

use crewdesk::server::{model::app::AppState, service::pilot::PilotService};
use crewdesk_test_utils::TestContext;

use super::*;

fn service(state: &AppState) -> PilotService<'_> {
    PilotService::new(
        &state.db,
        state.cache.as_ref(),
        &state.live,
        &state.providers,
    )
}

/// Inserts a VA with the Airtable configuration and a member with callsign `123`; returns the
/// VA and user IDs
async fn setup_member(
    test: &mut TestContext,
    provider_pilot_id: Option<&str>,
) -> Result<(i32, i32), TestError> {
    let va = test.va().insert_va("900", Some(factory::flight_modes())).await?;
    test.va()
        .insert_provider_config(va.id, factory::airtable_config(BASE_ID))
        .await?;
    let user = test.user().insert_user(DISCORD_ID, Some("pilot")).await?;

    match provider_pilot_id {
        Some(record_id) => {
            test.user()
                .insert_synced_membership(user.id, va.id, "123", record_id)
                .await?;
        }
        None => {
            test.user().insert_membership(user.id, va.id, "123").await?;
        }
    }

    Ok((va.id, user.id))
}
