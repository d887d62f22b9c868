//! Requests through the assembled router.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use crewdesk::server::{controller::util::caller::CALLER_HEADER, router};
use tower::ServiceExt;

use super::*;

fn register_request(caller: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/api/users/register")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(caller) = caller {
        builder = builder.header(CALLER_HEADER, caller);
    }

    builder
        .body(Body::from(r#"{"ifc_username":"skyking"}"#))
        .unwrap()
}

/// Expect 401 Unauthorized when the caller header is missing
#[tokio::test]
async fn missing_caller_header_is_unauthorized() -> Result<(), TestError> {
    let test = TestBuilder::new().with_crewdesk_tables().build().await?;
    let app = router::routes().with_state(test.into_app_state());

    let resp = app.oneshot(register_request(None)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect 401 Unauthorized when the caller header is not a Discord snowflake
#[tokio::test]
async fn malformed_caller_header_is_unauthorized() -> Result<(), TestError> {
    let test = TestBuilder::new().with_crewdesk_tables().build().await?;
    let app = router::routes().with_state(test.into_app_state());

    let resp = app.oneshot(register_request(Some("pilot#1"))).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect the caller header to reach the handler
#[tokio::test]
async fn caller_header_reaches_handler() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_crewdesk_tables().build().await?;
    test.live()
        .create_user_lookup_endpoint("skyking", Some("live-user-1"), 1);
    let app = router::routes().with_state(test.into_app_state());

    let resp = app
        .oneshot(register_request(Some(DISCORD_ID)))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    test.assert_mocks();

    Ok(())
}

/// Expect the OpenAPI document to be served
#[tokio::test]
async fn serves_openapi_document() -> Result<(), TestError> {
    let test = TestBuilder::new().with_crewdesk_tables().build().await?;
    let app = router::routes().with_state(test.into_app_state());

    let request = Request::builder()
        .uri("/api/docs/openapi.json")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(request).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}
