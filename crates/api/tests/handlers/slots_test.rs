use axum::http::StatusCode;
use chrono::Duration;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use shelterwalk_core::models::actor::ActorRole;

use crate::test_utils::{actor, as_actor, caregiver, hours_from_base, TestContext};

#[tokio::test]
async fn test_create_and_get_slot() {
    let ctx = TestContext::new();
    let rex = ctx.animal("Rex").await;

    let slot = ctx.publish_slot(rex, 2).await;
    assert_eq!(slot["animal_id"], json!(rex));
    assert_eq!(slot["start_time"], "2026-06-01T10:00:00");
    assert_eq!(slot["end_time"], "2026-06-01T11:00:00");

    let id = slot["id"].as_str().unwrap();
    let volunteer = ctx.volunteer("petra").await;
    let response = as_actor(ctx.server.get(&format!("/api/slots/{}", id)), &volunteer).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), slot);
}

#[tokio::test]
async fn test_only_slot_managers_publish_slots() {
    let ctx = TestContext::new();
    let body = json!({
        "animal_id": ctx.animal("Rex").await,
        "start_time": hours_from_base(1),
        "end_time": hours_from_base(2),
    });

    for role in [ActorRole::Vet, ActorRole::Volunteer, ActorRole::VerifiedVolunteer] {
        let response = as_actor(ctx.server.post("/api/slots"), &actor(role))
            .json(&body)
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    let response = as_actor(ctx.server.post("/api/slots"), &actor(ActorRole::Admin))
        .json(&body)
        .await;
    response.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_invalid_ranges_are_bad_requests() {
    let ctx = TestContext::new();
    let animal = ctx.animal("Rex").await;

    let inverted = as_actor(ctx.server.post("/api/slots"), &caregiver())
        .json(&json!({
            "animal_id": animal,
            "start_time": hours_from_base(3),
            "end_time": hours_from_base(2),
        }))
        .await;
    inverted.assert_status(StatusCode::BAD_REQUEST);

    let past = as_actor(ctx.server.post("/api/slots"), &caregiver())
        .json(&json!({
            "animal_id": animal,
            "start_time": hours_from_base(-2),
            "end_time": hours_from_base(-1),
        }))
        .await;
    past.assert_status(StatusCode::BAD_REQUEST);
    assert!(
        past.json::<Value>()["error"]
            .as_str()
            .unwrap()
            .starts_with("Validation error")
    );
}

#[tokio::test]
async fn test_list_slots_with_filters() {
    let ctx = TestContext::new();
    let rex = ctx.animal("Rex").await;
    let bara = ctx.animal("Bára").await;
    let volunteer = ctx.volunteer("petra").await;

    let first = ctx.publish_slot(rex, 1).await;
    let second = ctx.publish_slot(rex, 4).await;
    ctx.publish_slot(bara, 2).await;
    ctx.claim(second["id"].as_str().unwrap(), &volunteer).await;

    let all = as_actor(ctx.server.get("/api/slots"), &volunteer).await;
    all.assert_status_ok();
    assert_eq!(all.json::<Vec<Value>>().len(), 3);

    let rex_open = as_actor(
        ctx.server
            .get(&format!("/api/slots?animal_id={}&only_open=true", rex)),
        &volunteer,
    )
    .await;
    assert_eq!(rex_open.json::<Vec<Value>>(), vec![first.clone()]);

    ctx.clock.advance(Duration::hours(3));
    let upcoming = as_actor(ctx.server.get("/api/slots"), &volunteer).await;
    assert_eq!(upcoming.json::<Vec<Value>>(), vec![second]);

    let with_past = as_actor(ctx.server.get("/api/slots?include_past=true"), &volunteer).await;
    assert_eq!(with_past.json::<Vec<Value>>().len(), 3);
}

#[tokio::test]
async fn test_update_and_delete_slot() {
    let ctx = TestContext::new();
    let rex = ctx.animal("Rex").await;
    let slot = ctx.publish_slot(rex, 1).await;
    let path = format!("/api/slots/{}", slot["id"].as_str().unwrap());
    let moved = json!({
        "animal_id": rex,
        "start_time": hours_from_base(5),
        "end_time": hours_from_base(6),
    });

    let denied = as_actor(ctx.server.put(&path), &ctx.volunteer("petra").await)
        .json(&moved)
        .await;
    denied.assert_status(StatusCode::FORBIDDEN);

    let updated = as_actor(ctx.server.put(&path), &caregiver())
        .json(&moved)
        .await;
    updated.assert_status_ok();
    assert_eq!(updated.json::<Value>()["start_time"], "2026-06-01T13:00:00");

    let deleted = as_actor(ctx.server.delete(&path), &caregiver()).await;
    deleted.assert_status(StatusCode::NO_CONTENT);

    let missing = as_actor(ctx.server.get(&path), &caregiver()).await;
    missing.assert_status(StatusCode::NOT_FOUND);

    let again = as_actor(ctx.server.delete(&path), &caregiver()).await;
    again.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_input_is_a_json_bad_request() {
    let ctx = TestContext::new();
    let animal = ctx.animal("Rex").await;

    let bad_timestamp = as_actor(ctx.server.post("/api/slots"), &caregiver())
        .json(&json!({
            "animal_id": animal,
            "start_time": "tomorrow",
            "end_time": hours_from_base(2),
        }))
        .await;
    bad_timestamp.assert_status(StatusCode::BAD_REQUEST);
    let error = bad_timestamp.json::<Value>()["error"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(error.starts_with("Validation error"));

    let bad_id = as_actor(ctx.server.get("/api/slots/not-a-uuid"), &caregiver()).await;
    bad_id.assert_status(StatusCode::BAD_REQUEST);
    assert!(bad_id.json::<Value>()["error"].is_string());

    let bad_flag = as_actor(ctx.server.get("/api/slots?only_open=maybe"), &caregiver()).await;
    bad_flag.assert_status(StatusCode::BAD_REQUEST);
    assert!(bad_flag.json::<Value>()["error"].is_string());
}
