//! In-process implementation of the repository traits.
//!
//! One async mutex guards all tables, so every trait call is a single
//! serialisable unit: the claim check in [`ReservationRepository::insert_request`]
//! and the compare-and-swap in
//! [`ReservationRepository::compare_and_set_status`] cannot interleave.
//! Used by tests and for running the API without PostgreSQL.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::errors::{WalkError, WalkResult};
use crate::models::{
    directory::{AnimalProfile, PersonProfile},
    reservation::{RequestFilter, ReservationRequest, ReservationStatus},
    slot::Slot,
};
use crate::repository::{AnimalDirectory, PeopleDirectory, ReservationRepository, SlotRepository};

#[derive(Debug, Default)]
struct Tables {
    slots: HashMap<Uuid, Slot>,
    requests: HashMap<Uuid, ReservationRequest>,
    animals: HashMap<Uuid, AnimalProfile>,
    people: HashMap<Uuid, PersonProfile>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_animal(&self, animal: AnimalProfile) {
        self.tables.lock().await.animals.insert(animal.id, animal);
    }

    pub async fn add_person(&self, person: PersonProfile) {
        self.tables.lock().await.people.insert(person.id, person);
    }

    /// Loads a request exactly as given, skipping claim checks. Meant for
    /// seeding history, not for new reservations.
    pub async fn restore_request(&self, request: ReservationRequest) {
        self.tables.lock().await.requests.insert(request.id, request);
    }
}

#[async_trait]
impl SlotRepository for MemoryStore {
    async fn insert_slot(&self, slot: &Slot) -> WalkResult<Slot> {
        let mut tables = self.tables.lock().await;
        if tables.slots.contains_key(&slot.id) {
            return Err(WalkError::Conflict(format!("Slot {} already exists", slot.id)));
        }
        tables.slots.insert(slot.id, slot.clone());
        Ok(slot.clone())
    }

    async fn get_slot(&self, id: Uuid) -> WalkResult<Option<Slot>> {
        Ok(self.tables.lock().await.slots.get(&id).cloned())
    }

    async fn update_slot(&self, slot: &Slot) -> WalkResult<Option<Slot>> {
        let mut tables = self.tables.lock().await;
        Ok(tables.slots.get_mut(&slot.id).map(|stored| {
            stored.animal_id = slot.animal_id;
            stored.start_time = slot.start_time;
            stored.end_time = slot.end_time;
            stored.clone()
        }))
    }

    async fn delete_slot(&self, id: Uuid) -> WalkResult<bool> {
        Ok(self.tables.lock().await.slots.remove(&id).is_some())
    }

    async fn list_slots(&self, animal_id: Option<Uuid>) -> WalkResult<Vec<Slot>> {
        let tables = self.tables.lock().await;
        let mut slots: Vec<Slot> = tables
            .slots
            .values()
            .filter(|slot| animal_id.is_none_or(|id| slot.animal_id == id))
            .cloned()
            .collect();
        slots.sort_by(|a, b| a.start_time.cmp(&b.start_time).then(a.id.cmp(&b.id)));
        Ok(slots)
    }
}

#[async_trait]
impl ReservationRepository for MemoryStore {
    async fn insert_request(&self, request: &ReservationRequest) -> WalkResult<ReservationRequest> {
        let mut tables = self.tables.lock().await;

        if !tables.slots.contains_key(&request.slot_id) {
            return Err(WalkError::NotFound(format!(
                "Slot with ID {} not found",
                request.slot_id
            )));
        }
        let taken = tables
            .requests
            .values()
            .any(|other| other.slot_id == request.slot_id && other.status.holds_slot());
        if taken && request.status.holds_slot() {
            return Err(WalkError::Conflict(format!(
                "Slot {} is already reserved",
                request.slot_id
            )));
        }

        tables.requests.insert(request.id, request.clone());
        Ok(request.clone())
    }

    async fn get_request(&self, id: Uuid) -> WalkResult<Option<ReservationRequest>> {
        Ok(self.tables.lock().await.requests.get(&id).cloned())
    }

    async fn compare_and_set_status(
        &self,
        id: Uuid,
        expected: ReservationStatus,
        new: ReservationStatus,
    ) -> WalkResult<Option<ReservationRequest>> {
        let mut tables = self.tables.lock().await;
        match tables.requests.get_mut(&id) {
            Some(request) if request.status == expected => {
                request.status = new;
                Ok(Some(request.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete_request_if_status(
        &self,
        id: Uuid,
        expected: ReservationStatus,
    ) -> WalkResult<bool> {
        let mut tables = self.tables.lock().await;
        let matches = tables
            .requests
            .get(&id)
            .is_some_and(|request| request.status == expected);
        if matches {
            tables.requests.remove(&id);
        }
        Ok(matches)
    }

    async fn list_requests(&self, filter: &RequestFilter) -> WalkResult<Vec<ReservationRequest>> {
        let tables = self.tables.lock().await;
        let mut requests: Vec<ReservationRequest> = tables
            .requests
            .values()
            .filter(|request| filter.matches(request))
            .cloned()
            .collect();
        requests.sort_by(|a, b| a.request_date.cmp(&b.request_date).then(a.id.cmp(&b.id)));
        Ok(requests)
    }
}

#[async_trait]
impl AnimalDirectory for MemoryStore {
    async fn animals(&self, ids: &[Uuid]) -> WalkResult<HashMap<Uuid, AnimalProfile>> {
        let tables = self.tables.lock().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.animals.get(id).map(|animal| (*id, animal.clone())))
            .collect())
    }
}

#[async_trait]
impl PeopleDirectory for MemoryStore {
    async fn people(&self, ids: &[Uuid]) -> WalkResult<HashMap<Uuid, PersonProfile>> {
        let tables = self.tables.lock().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.people.get(id).map(|person| (*id, person.clone())))
            .collect())
    }
}
