use crewdesk::server::{
    error::{config::ConfigError, Error},
    service::{flight_mode::FlightModeService, va::VirtualAirlineService},
};
use serde_json::json;

use super::*;

/// Expect a saved configuration to be visible through the cached VA config right away
#[tokio::test]
async fn save_replaces_cached_modes() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::VirtualAirline)
        .build()
        .await?;
    let va = test.va().insert_va("900", None).await?;

    let state = test.into_app_state();
    let va_service = VirtualAirlineService::new(&state.db, state.cache.as_ref());
    assert!(va_service.get_config(va.id).await.unwrap().flight_modes.0.is_empty());

    let saved = FlightModeService::new(&state.db, state.cache.as_ref(), &state.live)
        .save_config(va.id, factory::flight_modes())
        .await
        .unwrap();
    let config = va_service.get_config(va.id).await.unwrap();

    assert_eq!(config.flight_modes, saved);
    assert_eq!(config.flight_modes.get("career").map(|m| m.multiplier()), Some(1.5));

    Ok(())
}

/// Expect every problem to be reported and nothing stored for an invalid payload
#[tokio::test]
async fn invalid_payload_is_rejected_whole() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::VirtualAirline)
        .build()
        .await?;
    let va = test.va().insert_va("900", Some(factory::flight_modes())).await?;

    let state = test.into_app_state();
    let result = FlightModeService::new(&state.db, state.cache.as_ref(), &state.live)
        .save_config(
            va.id,
            json!({
                "ferry": { "enabled": true, "displayName": "", "requiresRouteSelection": false },
                "tour": {
                    "enabled": true,
                    "displayName": "Tour",
                    "requiresRouteSelection": true,
                    "validations": { "validationMode": "fuzzy" }
                }
            }),
        )
        .await;

    let Err(Error::ConfigError(ConfigError::InvalidPayload(details))) = result else {
        panic!("expected a configuration error, got {:?}", result);
    };
    assert_eq!(details.len(), 3, "{:?}", details);

    let config = VirtualAirlineService::new(&state.db, state.cache.as_ref())
        .get_config(va.id)
        .await
        .unwrap();
    assert!(config.flight_modes.get("career").is_some());

    Ok(())
}

/// Expect NotFound when saving modes for a VA that does not exist
#[tokio::test]
async fn unknown_va_is_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::VirtualAirline)
        .build()
        .await?;

    let state = test.into_app_state();
    let result = FlightModeService::new(&state.db, state.cache.as_ref(), &state.live)
        .save_config(42, factory::flight_modes())
        .await;

    assert!(matches!(result, Err(Error::NotFound(_))));

    Ok(())
}
