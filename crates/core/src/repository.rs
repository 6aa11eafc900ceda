//! Persistence seams for the scheduling engine.
//!
//! The stores in [`crate::services`] hold their validation and lifecycle
//! rules; implementations of these traits only have to make each call atomic
//! on its own entity. `shelterwalk-db` provides the PostgreSQL
//! implementation and [`crate::memory`] an in-process one.

use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::WalkResult;
use crate::models::{
    directory::{AnimalProfile, PersonProfile},
    reservation::{RequestFilter, ReservationRequest, ReservationStatus},
    slot::Slot,
};

#[async_trait]
pub trait SlotRepository: Send + Sync {
    async fn insert_slot(&self, slot: &Slot) -> WalkResult<Slot>;

    async fn get_slot(&self, id: Uuid) -> WalkResult<Option<Slot>>;

    /// Replaces the animal and times of an existing slot; `None` if it is gone.
    async fn update_slot(&self, slot: &Slot) -> WalkResult<Option<Slot>>;

    /// Returns whether a row was removed.
    async fn delete_slot(&self, id: Uuid) -> WalkResult<bool>;

    /// All slots, optionally for one animal, ordered by start time.
    async fn list_slots(&self, animal_id: Option<Uuid>) -> WalkResult<Vec<Slot>>;
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Inserts a new request.
    ///
    /// Must fail with `NotFound` if the slot does not exist and with
    /// `Conflict` if the slot already has an active or completed request,
    /// checked atomically with the insert.
    async fn insert_request(&self, request: &ReservationRequest) -> WalkResult<ReservationRequest>;

    async fn get_request(&self, id: Uuid) -> WalkResult<Option<ReservationRequest>>;

    /// Sets `status = new` only if the stored status is still `expected`.
    /// `None` means the row is missing or its status moved on.
    async fn compare_and_set_status(
        &self,
        id: Uuid,
        expected: ReservationStatus,
        new: ReservationStatus,
    ) -> WalkResult<Option<ReservationRequest>>;

    /// Deletes the request only if its status is still `expected`.
    async fn delete_request_if_status(
        &self,
        id: Uuid,
        expected: ReservationStatus,
    ) -> WalkResult<bool>;

    /// Matching requests ordered by request date.
    async fn list_requests(&self, filter: &RequestFilter) -> WalkResult<Vec<ReservationRequest>>;
}

/// Animal names, owned by the shelter's animal registry.
#[async_trait]
pub trait AnimalDirectory: Send + Sync {
    async fn animals(&self, ids: &[Uuid]) -> WalkResult<HashMap<Uuid, AnimalProfile>>;
}

/// Display identity of users, owned by the identity provider.
#[async_trait]
pub trait PeopleDirectory: Send + Sync {
    async fn people(&self, ids: &[Uuid]) -> WalkResult<HashMap<Uuid, PersonProfile>>;
}
