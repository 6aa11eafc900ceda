use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use crate::clock::Clock;
use crate::errors::{WalkError, WalkResult};
use crate::models::{
    reservation::{RequestFilter, ReservationStatus},
    slot::{Slot, SlotFilter},
};
use crate::repository::{ReservationRepository, SlotRepository};
use crate::time_range::TimeRange;

/// Owns walk slots: publishing, editing, removing and listing them.
#[derive(Clone)]
pub struct SlotStore {
    slots: Arc<dyn SlotRepository>,
    requests: Arc<dyn ReservationRepository>,
    clock: Arc<dyn Clock>,
}

impl SlotStore {
    pub fn new(
        slots: Arc<dyn SlotRepository>,
        requests: Arc<dyn ReservationRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            slots,
            requests,
            clock,
        }
    }

    pub async fn create_slot(
        &self,
        animal_id: Uuid,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> WalkResult<Slot> {
        let now = self.clock.now();
        let range = TimeRange::new(start_time, end_time)?;
        range.ensure_not_in_past(now)?;

        self.warn_on_overlap(animal_id, &range, None).await?;

        let slot = Slot {
            id: Uuid::new_v4(),
            animal_id,
            start_time,
            end_time,
            created_at: now,
        };
        let slot = self.slots.insert_slot(&slot).await?;

        info!(slot_id = %slot.id, animal_id = %animal_id, "Walk slot published");
        Ok(slot)
    }

    /// Edits are accepted even while the slot has an active reservation.
    pub async fn update_slot(
        &self,
        id: Uuid,
        animal_id: Uuid,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> WalkResult<Slot> {
        let range = TimeRange::new(start_time, end_time)?;
        range.ensure_not_in_past(self.clock.now())?;

        let existing = self.get_slot(id).await?;
        self.warn_on_overlap(animal_id, &range, Some(id)).await?;

        let updated = Slot {
            animal_id,
            start_time,
            end_time,
            ..existing
        };
        let slot = self
            .slots
            .update_slot(&updated)
            .await?
            .ok_or_else(|| slot_not_found(id))?;

        info!(slot_id = %id, "Walk slot updated");
        Ok(slot)
    }

    /// Requests against the slot are left in place.
    pub async fn delete_slot(&self, id: Uuid) -> WalkResult<()> {
        if !self.slots.delete_slot(id).await? {
            return Err(slot_not_found(id));
        }
        info!(slot_id = %id, "Walk slot deleted");
        Ok(())
    }

    pub async fn get_slot(&self, id: Uuid) -> WalkResult<Slot> {
        self.slots
            .get_slot(id)
            .await?
            .ok_or_else(|| slot_not_found(id))
    }

    pub async fn list_slots(&self, filter: &SlotFilter) -> WalkResult<Vec<Slot>> {
        let now = self.clock.now();
        let mut slots = self.slots.list_slots(filter.animal_id).await?;

        if !filter.include_past {
            slots.retain(|slot| !slot.range().has_ended(now));
        }

        if filter.only_open {
            let claimed: HashSet<Uuid> = self
                .requests
                .list_requests(&RequestFilter {
                    status_in: Some(ReservationStatus::HOLDING.to_vec()),
                    ..Default::default()
                })
                .await?
                .into_iter()
                .map(|request| request.slot_id)
                .collect();
            slots.retain(|slot| !claimed.contains(&slot.id));
        }

        Ok(slots)
    }

    // Overlapping slots for one animal are allowed; they are only reported.
    async fn warn_on_overlap(
        &self,
        animal_id: Uuid,
        range: &TimeRange,
        ignore: Option<Uuid>,
    ) -> WalkResult<()> {
        let siblings = self.slots.list_slots(Some(animal_id)).await?;
        for other in siblings
            .iter()
            .filter(|other| Some(other.id) != ignore)
            .filter(|other| other.range().overlaps(range))
        {
            warn!(
                animal_id = %animal_id,
                overlapping_slot = %other.id,
                "Slot overlaps an existing slot for the same animal"
            );
        }
        Ok(())
    }
}

fn slot_not_found(id: Uuid) -> WalkError {
    WalkError::NotFound(format!("Slot with ID {} not found", id))
}
