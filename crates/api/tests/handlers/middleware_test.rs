use axum::http::{HeaderName, HeaderValue, StatusCode};
use rstest::rstest;
use serde_json::Value;
use shelterwalk_api::middleware::error_handling::map_error;
use shelterwalk_core::{
    errors::WalkError,
    models::{actor::ActorRole, reservation::ReservationStatus},
};

use crate::test_utils::TestContext;

#[rstest]
#[case(WalkError::Validation("bad range".into()), StatusCode::BAD_REQUEST)]
#[case(WalkError::NotFound("gone".into()), StatusCode::NOT_FOUND)]
#[case(WalkError::Conflict("taken".into()), StatusCode::CONFLICT)]
#[case(
    WalkError::IllegalTransition { from: ReservationStatus::Pending, to: ReservationStatus::Completed },
    StatusCode::UNPROCESSABLE_ENTITY
)]
#[case(
    WalkError::ForbiddenTransition {
        from: ReservationStatus::Pending,
        to: ReservationStatus::Approved,
        role: ActorRole::Volunteer,
    },
    StatusCode::FORBIDDEN
)]
#[case(WalkError::Forbidden("not yours".into()), StatusCode::FORBIDDEN)]
#[case(WalkError::Unauthenticated("who?".into()), StatusCode::UNAUTHORIZED)]
#[case(WalkError::Database(eyre::eyre!("connection reset")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(
    WalkError::Internal(Box::new(std::io::Error::other("boom"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: WalkError, #[case] expected: StatusCode) {
    assert_eq!(map_error(error).status(), expected);
}

#[tokio::test]
async fn test_missing_identity_is_unauthorized() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/api/slots").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let body = response.json::<Value>();
    assert!(body["error"].as_str().unwrap().contains("x-actor-id"));
}

#[tokio::test]
async fn test_unknown_role_is_unauthorized() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/api/slots")
        .add_header(
            HeaderName::from_static("x-actor-id"),
            HeaderValue::from_static("6f1c1c8e-3c55-4a8e-9b43-2f6f1f1c0a11"),
        )
        .add_header(
            HeaderName::from_static("x-actor-role"),
            HeaderValue::from_static("janitor"),
        )
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}
