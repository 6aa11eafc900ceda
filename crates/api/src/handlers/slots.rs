use axum::{extract::State, http::StatusCode, Json};
use shelterwalk_core::models::slot::{CreateSlotRequest, Slot, SlotFilter, UpdateSlotRequest};
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

#[axum::debug_handler]
pub async fn create_slot(
    State(state): State<Arc<ApiState>>,
    CurrentActor(actor): CurrentActor,
    extract::Json(payload): extract::Json<CreateSlotRequest>,
) -> Result<(StatusCode, Json<Slot>), AppError> {
    actor.ensure_can_manage_slots()?;

    let slot = state
        .scheduler
        .slots
        .create_slot(payload.animal_id, payload.start_time, payload.end_time)
        .await?;

    Ok((StatusCode::CREATED, Json(slot)))
}

#[axum::debug_handler]
pub async fn list_slots(
    State(state): State<Arc<ApiState>>,
    CurrentActor(_actor): CurrentActor,
    Query(filter): Query<SlotFilter>,
) -> Result<Json<Vec<Slot>>, AppError> {
    let slots = state.scheduler.slots.list_slots(&filter).await?;
    Ok(Json(slots))
}

#[axum::debug_handler]
pub async fn get_slot(
    State(state): State<Arc<ApiState>>,
    CurrentActor(_actor): CurrentActor,
    Path(id): Path<Uuid>,
) -> Result<Json<Slot>, AppError> {
    let slot = state.scheduler.slots.get_slot(id).await?;
    Ok(Json(slot))
}

#[axum::debug_handler]
pub async fn update_slot(
    State(state): State<Arc<ApiState>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<Uuid>,
    extract::Json(payload): extract::Json<UpdateSlotRequest>,
) -> Result<Json<Slot>, AppError> {
    actor.ensure_can_manage_slots()?;

    let slot = state
        .scheduler
        .slots
        .update_slot(id, payload.animal_id, payload.start_time, payload.end_time)
        .await?;

    Ok(Json(slot))
}

#[axum::debug_handler]
pub async fn delete_slot(
    State(state): State<Arc<ApiState>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    actor.ensure_can_manage_slots()?;
    state.scheduler.slots.delete_slot(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
