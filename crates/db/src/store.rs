//! PostgreSQL backend for the scheduling engine.
//!
//! Wraps the repository functions and converts their rows and errors into the
//! core domain types. Uniqueness and status checks run inside single SQL
//! statements, so concurrent callers are serialised by PostgreSQL itself.

use std::collections::HashMap;

use async_trait::async_trait;
use shelterwalk_core::{
    errors::{WalkError, WalkResult},
    models::{
        directory::{AnimalProfile, PersonProfile},
        reservation::{RequestFilter, ReservationRequest, ReservationStatus},
        slot::Slot,
    },
    repository::{AnimalDirectory, PeopleDirectory, ReservationRepository, SlotRepository},
};
use uuid::Uuid;

use crate::models::{DbReservationRequest, DbSlot};
use crate::repositories::{directory, reservation, slot};
use crate::schema::SLOT_HOLDER_INDEX;
use crate::DbPool;

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Unique violations become `Conflict`, worded after the constraint that
/// fired; everything else is an infrastructure failure.
fn into_walk_error(report: eyre::Report) -> WalkError {
    let violated = report
        .downcast_ref::<sqlx::Error>()
        .and_then(|err| err.as_database_error())
        .filter(|db_err| db_err.is_unique_violation())
        .map(|db_err| conflict_message(db_err.constraint()));

    match violated {
        Some(message) => WalkError::Conflict(message),
        None => WalkError::Database(report),
    }
}

fn conflict_message(constraint: Option<&str>) -> String {
    match constraint {
        Some(SLOT_HOLDER_INDEX) => "Slot is already reserved".to_string(),
        Some(name) => format!("Record already exists (violates {})", name),
        None => "Record already exists".to_string(),
    }
}

fn to_request(row: DbReservationRequest) -> WalkResult<ReservationRequest> {
    ReservationRequest::try_from(row).map_err(WalkError::Database)
}

fn to_row(slot: &Slot) -> DbSlot {
    DbSlot {
        id: slot.id,
        animal_id: slot.animal_id,
        start_time: slot.start_time,
        end_time: slot.end_time,
        created_at: slot.created_at,
    }
}

#[async_trait]
impl SlotRepository for PgStore {
    async fn insert_slot(&self, new_slot: &Slot) -> WalkResult<Slot> {
        let row = slot::insert_slot(&self.pool, &to_row(new_slot))
            .await
            .map_err(into_walk_error)?;
        Ok(row.into())
    }

    async fn get_slot(&self, id: Uuid) -> WalkResult<Option<Slot>> {
        let row = slot::get_slot_by_id(&self.pool, id)
            .await
            .map_err(into_walk_error)?;
        Ok(row.map(Slot::from))
    }

    async fn update_slot(&self, changed: &Slot) -> WalkResult<Option<Slot>> {
        let row = slot::update_slot(&self.pool, &to_row(changed))
            .await
            .map_err(into_walk_error)?;
        Ok(row.map(Slot::from))
    }

    async fn delete_slot(&self, id: Uuid) -> WalkResult<bool> {
        slot::delete_slot(&self.pool, id)
            .await
            .map_err(into_walk_error)
    }

    async fn list_slots(&self, animal_id: Option<Uuid>) -> WalkResult<Vec<Slot>> {
        let rows = slot::list_slots(&self.pool, animal_id)
            .await
            .map_err(into_walk_error)?;
        Ok(rows.into_iter().map(Slot::from).collect())
    }
}

#[async_trait]
impl ReservationRepository for PgStore {
    async fn insert_request(&self, request: &ReservationRequest) -> WalkResult<ReservationRequest> {
        let row = DbReservationRequest {
            id: request.id,
            slot_id: request.slot_id,
            requester_id: request.requester_id,
            request_date: request.request_date,
            status: request.status.code(),
        };

        match reservation::insert_request(&self.pool, &row)
            .await
            .map_err(into_walk_error)?
        {
            Some(inserted) => to_request(inserted),
            None => Err(WalkError::NotFound(format!(
                "Slot with ID {} not found",
                request.slot_id
            ))),
        }
    }

    async fn get_request(&self, id: Uuid) -> WalkResult<Option<ReservationRequest>> {
        reservation::get_request_by_id(&self.pool, id)
            .await
            .map_err(into_walk_error)?
            .map(to_request)
            .transpose()
    }

    async fn compare_and_set_status(
        &self,
        id: Uuid,
        expected: ReservationStatus,
        new: ReservationStatus,
    ) -> WalkResult<Option<ReservationRequest>> {
        reservation::compare_and_set_status(&self.pool, id, expected.code(), new.code())
            .await
            .map_err(into_walk_error)?
            .map(to_request)
            .transpose()
    }

    async fn delete_request_if_status(
        &self,
        id: Uuid,
        expected: ReservationStatus,
    ) -> WalkResult<bool> {
        reservation::delete_request_if_status(&self.pool, id, expected.code())
            .await
            .map_err(into_walk_error)
    }

    async fn list_requests(&self, filter: &RequestFilter) -> WalkResult<Vec<ReservationRequest>> {
        let statuses = filter
            .status_in
            .as_ref()
            .map(|statuses| statuses.iter().map(|s| s.code()).collect());

        reservation::list_requests(&self.pool, filter.requester_id, filter.slot_id, statuses)
            .await
            .map_err(into_walk_error)?
            .into_iter()
            .map(to_request)
            .collect()
    }
}

#[async_trait]
impl AnimalDirectory for PgStore {
    async fn animals(&self, ids: &[Uuid]) -> WalkResult<HashMap<Uuid, AnimalProfile>> {
        let rows = directory::get_animals_by_ids(&self.pool, ids)
            .await
            .map_err(into_walk_error)?;
        Ok(rows
            .into_iter()
            .map(|row| (row.id, AnimalProfile::from(row)))
            .collect())
    }
}

#[async_trait]
impl PeopleDirectory for PgStore {
    async fn people(&self, ids: &[Uuid]) -> WalkResult<HashMap<Uuid, PersonProfile>> {
        let rows = directory::get_users_by_ids(&self.pool, ids)
            .await
            .map_err(into_walk_error)?;
        Ok(rows
            .into_iter()
            .map(|row| (row.id, PersonProfile::from(row)))
            .collect())
    }
}
