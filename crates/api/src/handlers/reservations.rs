use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use shelterwalk_core::{
    errors::{WalkError, WalkResult},
    models::{
        actor::Actor,
        reservation::{
            CreateReservationRequest, RequestFilter, ReservationRequest, ReservationStatus,
            TransitionsResponse, UpdateStatusRequest,
        },
    },
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::{
        auth::CurrentActor,
        error_handling::AppError,
        extract::{self, Path, Query},
    },
    ApiState,
};

/// Query string of `GET /api/reservations`; `status` is a comma-separated
/// list of names or numeric codes.
#[derive(Debug, Default, Deserialize)]
pub struct ListRequestsQuery {
    pub requester_id: Option<Uuid>,
    pub slot_id: Option<Uuid>,
    pub status: Option<String>,
}

impl ListRequestsQuery {
    fn into_filter(self, actor: &Actor) -> WalkResult<RequestFilter> {
        let requester_id = scoped_requester(actor, self.requester_id)?;
        let status_in = self.status.map(|raw| parse_statuses(&raw)).transpose()?;

        Ok(RequestFilter {
            requester_id,
            slot_id: self.slot_id,
            status_in,
        })
    }
}

/// Volunteers only ever see their own reservations.
pub(crate) fn scoped_requester(actor: &Actor, requested: Option<Uuid>) -> WalkResult<Option<Uuid>> {
    if !actor.role.is_volunteer() {
        return Ok(requested);
    }
    if let Some(requester_id) = requested {
        actor.ensure_can_view(requester_id)?;
    }
    Ok(Some(actor.id))
}

fn parse_statuses(raw: &str) -> WalkResult<Vec<ReservationStatus>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            ReservationStatus::parse(part)
                .map_err(|_| WalkError::Validation(format!("Unknown reservation status: {}", part)))
        })
        .collect()
}

#[axum::debug_handler]
pub async fn create_request(
    State(state): State<Arc<ApiState>>,
    CurrentActor(actor): CurrentActor,
    extract::Json(payload): extract::Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ReservationRequest>), AppError> {
    actor.ensure_can_claim_slots()?;

    let request = state
        .scheduler
        .reservations
        .create_request(payload.slot_id, actor.id)
        .await?;

    Ok((StatusCode::CREATED, Json(request)))
}

#[axum::debug_handler]
pub async fn list_requests(
    State(state): State<Arc<ApiState>>,
    CurrentActor(actor): CurrentActor,
    Query(query): Query<ListRequestsQuery>,
) -> Result<Json<Vec<ReservationRequest>>, AppError> {
    let filter = query.into_filter(&actor)?;
    let requests = state.scheduler.reservations.list_requests(&filter).await?;
    Ok(Json(requests))
}

#[axum::debug_handler]
pub async fn get_request(
    State(state): State<Arc<ApiState>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<Uuid>,
) -> Result<Json<ReservationRequest>, AppError> {
    let request = state.scheduler.reservations.get_request(id).await?;
    actor.ensure_can_view(request.requester_id)?;
    Ok(Json(request))
}

#[axum::debug_handler]
pub async fn set_status(
    State(state): State<Arc<ApiState>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<Uuid>,
    extract::Json(payload): extract::Json<UpdateStatusRequest>,
) -> Result<Json<ReservationRequest>, AppError> {
    let request = state
        .scheduler
        .reservations
        .set_status(id, payload.status, &actor)
        .await?;
    Ok(Json(request))
}

#[axum::debug_handler]
pub async fn available_transitions(
    State(state): State<Arc<ApiState>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<Uuid>,
) -> Result<Json<TransitionsResponse>, AppError> {
    let (request, allowed) = state
        .scheduler
        .reservations
        .available_transitions(id, &actor)
        .await?;
    actor.ensure_can_view(request.requester_id)?;

    Ok(Json(TransitionsResponse {
        reservation_id: request.id,
        current: request.status,
        allowed,
    }))
}

#[axum::debug_handler]
pub async fn delete_request(
    State(state): State<Arc<ApiState>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.scheduler.reservations.delete_request(id, &actor).await?;
    Ok(StatusCode::NO_CONTENT)
}
