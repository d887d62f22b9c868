use crewdesk::server::{error::Error, service::user::UserService};

use super::*;

/// Expect a new user linked to the Live API user ID
#[tokio::test]
async fn creates_user_with_live_identity() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await?;
    test.live()
        .create_user_lookup_endpoint("skyking", Some("live-user-1"), 1);

    let state = test.into_app_state();
    let user = UserService::new(&state.db, state.cache.as_ref(), &state.live)
        .register(DISCORD_ID, " skyking ")
        .await
        .unwrap();

    assert_eq!(user.discord_id, DISCORD_ID);
    assert_eq!(user.ifc_username.as_deref(), Some("skyking"));
    assert_eq!(user.ifc_user_id.as_deref(), Some("live-user-1"));
    test.assert_mocks();

    Ok(())
}

/// Expect re-registration to replace the link and the cached lookup
#[tokio::test]
async fn replaces_existing_link() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await?;
    let existing = test.user().insert_user(DISCORD_ID, Some("oldname")).await?;
    test.live()
        .create_user_lookup_endpoint("newname", Some("live-user-2"), 1);

    let state = test.into_app_state();
    let service = UserService::new(&state.db, state.cache.as_ref(), &state.live);

    let before = service.get_by_discord_id(DISCORD_ID).await.unwrap();
    assert_eq!(before.ifc_username.as_deref(), Some("oldname"));

    let updated = service.register(DISCORD_ID, "newname").await.unwrap();
    let after = service.get_by_discord_id(DISCORD_ID).await.unwrap();

    assert_eq!(updated.id, existing.id);
    assert_eq!(after.ifc_username.as_deref(), Some("newname"));
    assert_eq!(after.ifc_user_id.as_deref(), Some("live-user-2"));

    Ok(())
}

/// Expect NotFound and no user row when the community username does not exist
#[tokio::test]
async fn unknown_username_is_not_found() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await?;
    test.live().create_user_lookup_endpoint("ghost", None, 1);

    let state = test.into_app_state();
    let service = UserService::new(&state.db, state.cache.as_ref(), &state.live);

    assert!(matches!(
        service.register(DISCORD_ID, "ghost").await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        service.get_by_discord_id(DISCORD_ID).await,
        Err(Error::NotFound(_))
    ));
    test.assert_mocks();

    Ok(())
}
