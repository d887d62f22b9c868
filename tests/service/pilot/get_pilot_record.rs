use crewdesk::server::error::Error;
use crewdesk_test_utils::fixtures::{airtable::record, factory::PILOT_TABLE};
use serde_json::json;

use super::*;

/// Expect only user-visible fields, keyed by display name and formatted
#[tokio::test]
async fn returns_user_visible_fields() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_crewdesk_tables().build().await?;
    let (va_id, _) = setup_member(&mut test, Some("recPilot1")).await?;
    test.airtable().create_get_record_endpoint(
        BASE_ID,
        PILOT_TABLE,
        record(
            "recPilot1",
            json!({ "Callsign": "DAL123", "Total Hours": 5400, "Email": "pilot@example.com" }),
        ),
        1,
    );

    let state = test.into_app_state();
    let pilot = service(&state).get_pilot_record(va_id, DISCORD_ID).await.unwrap();

    assert_eq!(pilot.id, "recPilot1");
    assert_eq!(
        serde_json::Value::Object(pilot.fields),
        json!({ "callsign": "DAL123", "Total Hours": "01:30" })
    );
    test.assert_mocks();

    Ok(())
}

/// Expect a validation error before any provider call when the pilot is not linked
#[tokio::test]
async fn unlinked_pilot_is_rejected() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_crewdesk_tables().build().await?;
    let (va_id, _) = setup_member(&mut test, None).await?;

    let state = test.into_app_state();

    assert!(matches!(
        service(&state).get_pilot_record(va_id, DISCORD_ID).await,
        Err(Error::Validation(_))
    ));

    Ok(())
}
