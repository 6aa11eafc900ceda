use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::clock::Clock;
use crate::errors::{WalkError, WalkResult};
use crate::models::{
    actor::Actor,
    reservation::{RequestFilter, ReservationRequest, ReservationStatus},
};
use crate::repository::{ReservationRepository, SlotRepository};
use crate::state_machine;

/// Owns reservation requests and drives them through the state machine.
#[derive(Clone)]
pub struct ReservationRequestStore {
    slots: Arc<dyn SlotRepository>,
    requests: Arc<dyn ReservationRepository>,
    clock: Arc<dyn Clock>,
}

impl ReservationRequestStore {
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

    /// Claims `slot_id` for `requester_id`.
    ///
    /// The slot must exist, must not have ended and must not already carry an
    /// active or completed request. The repository re-checks the last rule atomically with
    /// the insert, so two racing claims end with one `PENDING` request and
    /// one `Conflict`.
    pub async fn create_request(
        &self,
        slot_id: Uuid,
        requester_id: Uuid,
    ) -> WalkResult<ReservationRequest> {
        let now = self.clock.now();
        let slot = self
            .slots
            .get_slot(slot_id)
            .await?
            .ok_or_else(|| WalkError::NotFound(format!("Slot with ID {} not found", slot_id)))?;

        if slot.range().has_ended(now) {
            return Err(WalkError::Validation(format!(
                "Slot {} ended at {} and can no longer be reserved",
                slot_id, slot.end_time
            )));
        }

        let active = self
            .requests
            .list_requests(&RequestFilter {
                slot_id: Some(slot_id),
                status_in: Some(ReservationStatus::HOLDING.to_vec()),
                ..Default::default()
            })
            .await?;
        if !active.is_empty() {
            return Err(slot_taken(slot_id));
        }

        let request = ReservationRequest {
            id: Uuid::new_v4(),
            slot_id,
            requester_id,
            request_date: now,
            status: ReservationStatus::Pending,
        };
        let request = self.requests.insert_request(&request).await?;

        info!(
            reservation_id = %request.id,
            slot_id = %slot_id,
            requester_id = %requester_id,
            "Reservation requested"
        );
        Ok(request)
    }

    pub async fn set_status(
        &self,
        request_id: Uuid,
        new_status: ReservationStatus,
        actor: &Actor,
    ) -> WalkResult<ReservationRequest> {
        let current = self.get_request(request_id).await?;
        let is_owner = current.requester_id == actor.id;
        state_machine::check_transition(current.status, new_status, actor.role, is_owner)?;

        let updated = self
            .requests
            .compare_and_set_status(request_id, current.status, new_status)
            .await?
            .ok_or_else(|| {
                WalkError::Conflict(format!(
                    "Reservation {} changed while moving it from {} to {}; reload and retry",
                    request_id, current.status, new_status
                ))
            })?;

        info!(
            reservation_id = %request_id,
            from = %current.status,
            to = %new_status,
            actor_id = %actor.id,
            "Reservation status changed"
        );
        Ok(updated)
    }

    /// Removes a finished request. Deleting a `COMPLETED` request also
    /// removes its slot; that second step is best-effort and only logged on
    /// failure.
    pub async fn delete_request(&self, request_id: Uuid, actor: &Actor) -> WalkResult<()> {
        let current = self.get_request(request_id).await?;

        if !(actor.role.is_caregiver_equivalent() || actor.id == current.requester_id) {
            return Err(WalkError::Forbidden(format!(
                "Role {} cannot delete another volunteer's reservation",
                actor.role
            )));
        }

        if current.status.is_active() {
            return Err(WalkError::Conflict(format!(
                "Reservation {} is still {} and cannot be deleted",
                request_id, current.status
            )));
        }

        if !self
            .requests
            .delete_request_if_status(request_id, current.status)
            .await?
        {
            return Err(WalkError::Conflict(format!(
                "Reservation {} changed while deleting it; reload and retry",
                request_id
            )));
        }
        info!(reservation_id = %request_id, status = %current.status, "Reservation deleted");

        if current.status == ReservationStatus::Completed {
            self.consume_slot(current.slot_id).await;
        }
        Ok(())
    }

    pub async fn get_request(&self, request_id: Uuid) -> WalkResult<ReservationRequest> {
        self.requests
            .get_request(request_id)
            .await?
            .ok_or_else(|| {
                WalkError::NotFound(format!("Reservation with ID {} not found", request_id))
            })
    }

    pub async fn list_requests(&self, filter: &RequestFilter) -> WalkResult<Vec<ReservationRequest>> {
        self.requests.list_requests(filter).await
    }

    pub async fn available_transitions(
        &self,
        request_id: Uuid,
        actor: &Actor,
    ) -> WalkResult<(ReservationRequest, Vec<ReservationStatus>)> {
        let request = self.get_request(request_id).await?;
        let allowed = state_machine::available_transitions(
            request.status,
            actor.role,
            request.requester_id == actor.id,
        );
        Ok((request, allowed))
    }

    async fn consume_slot(&self, slot_id: Uuid) {
        match self.slots.delete_slot(slot_id).await {
            Ok(true) => debug!(slot_id = %slot_id, "Slot of completed walk removed"),
            Ok(false) => warn!(slot_id = %slot_id, "Slot of completed walk was already gone"),
            Err(e) => warn!(
                slot_id = %slot_id,
                error = %e,
                "Failed to remove slot of completed walk"
            ),
        }
    }
}

fn slot_taken(slot_id: Uuid) -> WalkError {
    WalkError::Conflict(format!("Slot {} is already reserved", slot_id))
}
