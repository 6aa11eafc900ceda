use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use shelterwalk_core::models::actor::ActorRole;

use crate::test_utils::{actor, as_actor, caregiver, TestContext};

async fn set_status(
    ctx: &TestContext,
    request_id: &str,
    status: &str,
    who: &shelterwalk_core::models::actor::Actor,
) -> axum_test::TestResponse {
    as_actor(
        ctx.server
            .put(&format!("/api/reservations/{}/status", request_id)),
        who,
    )
    .json(&json!({ "status": status }))
    .await
}

#[tokio::test]
async fn test_claim_creates_pending_request_for_caller() {
    let ctx = TestContext::new();
    let slot = ctx.publish_slot(ctx.animal("Rex").await, 1).await;
    let volunteer = ctx.volunteer("petra").await;

    let request = ctx.claim(slot["id"].as_str().unwrap(), &volunteer).await;

    assert_eq!(request["status"], "PENDING");
    assert_eq!(request["slot_id"], slot["id"]);
    assert_eq!(request["requester_id"], json!(volunteer.id));
    assert_eq!(request["request_date"], "2026-06-01T08:00:00");
}

#[tokio::test]
async fn test_only_verified_volunteers_and_admins_claim() {
    let ctx = TestContext::new();
    let animal = ctx.animal("Rex").await;

    for role in [ActorRole::Volunteer, ActorRole::Caregiver, ActorRole::Vet] {
        let slot = ctx.publish_slot(animal, 1).await;
        let response = as_actor(ctx.server.post("/api/reservations"), &actor(role))
            .json(&json!({ "slot_id": slot["id"] }))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    let slot = ctx.publish_slot(animal, 3).await;
    let response = as_actor(ctx.server.post("/api/reservations"), &actor(ActorRole::Admin))
        .json(&json!({ "slot_id": slot["id"] }))
        .await;
    response.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_second_claim_conflicts_and_unknown_slot_is_not_found() {
    let ctx = TestContext::new();
    let slot = ctx.publish_slot(ctx.animal("Rex").await, 1).await;
    let slot_id = slot["id"].as_str().unwrap();
    ctx.claim(slot_id, &ctx.volunteer("petra").await).await;

    let second = as_actor(
        ctx.server.post("/api/reservations"),
        &ctx.volunteer("karel").await,
    )
    .json(&json!({ "slot_id": slot_id }))
    .await;
    second.assert_status(StatusCode::CONFLICT);

    let unknown = as_actor(
        ctx.server.post("/api/reservations"),
        &ctx.volunteer("eva").await,
    )
    .json(&json!({ "slot_id": uuid::Uuid::new_v4() }))
    .await;
    unknown.assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_walk_workflow_over_http() {
    let ctx = TestContext::new();
    let slot = ctx.publish_slot(ctx.animal("Rex").await, 1).await;
    let volunteer = ctx.volunteer("petra").await;
    let staff = caregiver();
    let request = ctx.claim(slot["id"].as_str().unwrap(), &volunteer).await;
    let request_id = request["id"].as_str().unwrap();

    let skipped = set_status(&ctx, request_id, "COMPLETED", &staff).await;
    skipped.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let self_approved = set_status(&ctx, request_id, "APPROVED", &volunteer).await;
    self_approved.assert_status(StatusCode::FORBIDDEN);

    for status in ["APPROVED", "IN_PROGRESS", "COMPLETED"] {
        let response = set_status(&ctx, request_id, status, &staff).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], status);
    }

    let reclaim = as_actor(
        ctx.server.post("/api/reservations"),
        &ctx.volunteer("karel").await,
    )
    .json(&json!({ "slot_id": slot["id"] }))
    .await;
    reclaim.assert_status(StatusCode::CONFLICT);

    let deleted = as_actor(
        ctx.server
            .delete(&format!("/api/reservations/{}", request_id)),
        &staff,
    )
    .await;
    deleted.assert_status(StatusCode::NO_CONTENT);

    let slot_gone = as_actor(
        ctx.server
            .get(&format!("/api/slots/{}", slot["id"].as_str().unwrap())),
        &staff,
    )
    .await;
    slot_gone.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_status_in_body_is_rejected() {
    let ctx = TestContext::new();
    let slot = ctx.publish_slot(ctx.animal("Rex").await, 1).await;
    let request = ctx
        .claim(slot["id"].as_str().unwrap(), &ctx.volunteer("petra").await)
        .await;

    let response = set_status(&ctx, request["id"].as_str().unwrap(), "LOST", &caregiver()).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let error = response.json::<Value>()["error"].as_str().unwrap().to_string();
    assert!(error.starts_with("Validation error"));
}

#[tokio::test]
async fn test_malformed_reservation_ids_are_bad_requests() {
    let ctx = TestContext::new();
    let staff = caregiver();

    let path = as_actor(ctx.server.get("/api/reservations/not-a-uuid"), &staff).await;
    path.assert_status(StatusCode::BAD_REQUEST);
    assert!(path.json::<Value>()["error"].is_string());

    let query = as_actor(ctx.server.get("/api/reservations?slot_id=42"), &staff).await;
    query.assert_status(StatusCode::BAD_REQUEST);
    assert!(query.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_cancel_and_delete_rules() {
    let ctx = TestContext::new();
    let slot = ctx.publish_slot(ctx.animal("Rex").await, 1).await;
    let owner = ctx.volunteer("petra").await;
    let stranger = ctx.volunteer("karel").await;
    let request = ctx.claim(slot["id"].as_str().unwrap(), &owner).await;
    let request_id = request["id"].as_str().unwrap();
    let path = format!("/api/reservations/{}", request_id);

    let active_delete = as_actor(ctx.server.delete(&path), &owner).await;
    active_delete.assert_status(StatusCode::CONFLICT);

    let foreign_cancel = set_status(&ctx, request_id, "CANCELED", &stranger).await;
    foreign_cancel.assert_status(StatusCode::FORBIDDEN);

    let cancel = set_status(&ctx, request_id, "CANCELED", &owner).await;
    cancel.assert_status_ok();

    let foreign_delete = as_actor(ctx.server.delete(&path), &stranger).await;
    foreign_delete.assert_status(StatusCode::FORBIDDEN);

    let delete = as_actor(ctx.server.delete(&path), &owner).await;
    delete.assert_status(StatusCode::NO_CONTENT);

    // The slot stays published and can be claimed again.
    ctx.claim(slot["id"].as_str().unwrap(), &stranger).await;
}

#[tokio::test]
async fn test_volunteers_only_see_their_own_requests() {
    let ctx = TestContext::new();
    let animal = ctx.animal("Rex").await;
    let petra = ctx.volunteer("petra").await;
    let karel = ctx.volunteer("karel").await;
    let first = ctx.publish_slot(animal, 1).await;
    let second = ctx.publish_slot(animal, 3).await;
    let petras = ctx.claim(first["id"].as_str().unwrap(), &petra).await;
    let karels = ctx.claim(second["id"].as_str().unwrap(), &karel).await;

    let own = as_actor(ctx.server.get("/api/reservations"), &petra).await;
    own.assert_status_ok();
    assert_eq!(own.json::<Vec<Value>>(), vec![petras.clone()]);

    let snooping = as_actor(
        ctx.server
            .get(&format!("/api/reservations?requester_id={}", karel.id)),
        &petra,
    )
    .await;
    snooping.assert_status(StatusCode::FORBIDDEN);

    let foreign = as_actor(
        ctx.server
            .get(&format!("/api/reservations/{}", karels["id"].as_str().unwrap())),
        &petra,
    )
    .await;
    foreign.assert_status(StatusCode::FORBIDDEN);

    let staff_view = as_actor(ctx.server.get("/api/reservations"), &caregiver()).await;
    assert_eq!(staff_view.json::<Vec<Value>>().len(), 2);
}

#[tokio::test]
async fn test_list_requests_by_status() {
    let ctx = TestContext::new();
    let animal = ctx.animal("Rex").await;
    let petra = ctx.volunteer("petra").await;
    let first = ctx.publish_slot(animal, 1).await;
    let second = ctx.publish_slot(animal, 3).await;
    let pending = ctx.claim(first["id"].as_str().unwrap(), &petra).await;
    let canceled = ctx.claim(second["id"].as_str().unwrap(), &petra).await;
    set_status(&ctx, canceled["id"].as_str().unwrap(), "CANCELED", &petra)
        .await
        .assert_status_ok();

    let active = as_actor(
        ctx.server
            .get("/api/reservations?status=PENDING,APPROVED,IN_PROGRESS"),
        &caregiver(),
    )
    .await;
    assert_eq!(active.json::<Vec<Value>>(), vec![pending]);

    let by_code = as_actor(ctx.server.get("/api/reservations?status=5"), &caregiver()).await;
    assert_eq!(by_code.json::<Vec<Value>>().len(), 1);

    let bogus = as_actor(ctx.server.get("/api/reservations?status=LOST"), &caregiver()).await;
    bogus.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_available_transitions() {
    let ctx = TestContext::new();
    let slot = ctx.publish_slot(ctx.animal("Rex").await, 1).await;
    let owner = ctx.volunteer("petra").await;
    let request = ctx.claim(slot["id"].as_str().unwrap(), &owner).await;
    let path = format!(
        "/api/reservations/{}/transitions",
        request["id"].as_str().unwrap()
    );

    let staff = as_actor(ctx.server.get(&path), &caregiver()).await;
    staff.assert_status_ok();
    assert_eq!(
        staff.json::<Value>(),
        json!({
            "reservation_id": request["id"],
            "current": "PENDING",
            "allowed": ["APPROVED", "REJECTED", "CANCELED"],
        })
    );

    let own = as_actor(ctx.server.get(&path), &owner).await;
    assert_eq!(own.json::<Value>()["allowed"], json!(["CANCELED"]));

    let stranger = as_actor(ctx.server.get(&path), &ctx.volunteer("karel").await).await;
    stranger.assert_status(StatusCode::FORBIDDEN);
}
