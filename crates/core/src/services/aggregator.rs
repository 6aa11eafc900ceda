//! # Schedule aggregation
//!
//! Read-side views over slots and reservations. Nothing here writes; rows are
//! rebuilt from committed state on every call, joined with display data from
//! the animal and people directories.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::clock::Clock;
use crate::errors::WalkResult;
use crate::models::{
    actor::Actor,
    reservation::{RequestFilter, ReservationRequest, ReservationStatus},
    schedule::{CalendarCategory, CalendarEntry, OverviewFilter, ScheduleOverviewRow},
    slot::Slot,
};
use crate::repository::{AnimalDirectory, PeopleDirectory, ReservationRepository, SlotRepository};

const UNKNOWN_ANIMAL: &str = "Unknown animal";

#[derive(Clone)]
pub struct ScheduleAggregator {
    slots: Arc<dyn SlotRepository>,
    requests: Arc<dyn ReservationRepository>,
    animals: Arc<dyn AnimalDirectory>,
    people: Arc<dyn PeopleDirectory>,
    clock: Arc<dyn Clock>,
}

impl ScheduleAggregator {
    pub fn new(
        slots: Arc<dyn SlotRepository>,
        requests: Arc<dyn ReservationRepository>,
        animals: Arc<dyn AnimalDirectory>,
        people: Arc<dyn PeopleDirectory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            slots,
            requests,
            animals,
            people,
            clock,
        }
    }

    /// Every reservation (optionally one requester's) with its slot, animal
    /// and requester details, ordered by walk start.
    ///
    /// Requests whose slot no longer exists are skipped.
    pub async fn overview(&self, filter: &OverviewFilter) -> WalkResult<Vec<ScheduleOverviewRow>> {
        let requests: Vec<ReservationRequest> = self
            .requests
            .list_requests(&RequestFilter {
                requester_id: filter.requester_id,
                ..Default::default()
            })
            .await?
            .into_iter()
            .filter(|request| filter.scope.includes(request.status))
            .collect();

        let slots = self.slots_by_id().await?;
        let animal_ids: Vec<Uuid> = distinct(
            requests
                .iter()
                .filter_map(|request| slots.get(&request.slot_id))
                .map(|slot| slot.animal_id),
        );
        let requester_ids = distinct(requests.iter().map(|request| request.requester_id));
        let animals = self.animals.animals(&animal_ids).await?;
        let people = self.people.people(&requester_ids).await?;

        let mut rows = Vec::with_capacity(requests.len());
        for request in requests {
            let Some(slot) = slots.get(&request.slot_id) else {
                debug!(
                    reservation_id = %request.id,
                    slot_id = %request.slot_id,
                    "Skipping reservation whose slot was deleted"
                );
                continue;
            };
            let person = people.get(&request.requester_id);

            rows.push(ScheduleOverviewRow {
                reservation_id: request.id,
                slot_id: slot.id,
                animal_id: slot.animal_id,
                animal_name: animals.get(&slot.animal_id).map(|a| a.name.clone()),
                requester_id: request.requester_id,
                requester_username: person.map(|p| p.username.clone()),
                requester_full_name: person.map(|p| p.full_name()),
                requester_email: person.map(|p| p.email.clone()),
                start_time: slot.start_time,
                end_time: slot.end_time,
                request_date: request.request_date,
                status: request.status,
                status_label: request.status.label().to_string(),
            });
        }

        rows.sort_by(|a, b| {
            a.start_time
                .cmp(&b.start_time)
                .then(a.request_date.cmp(&b.request_date))
        });
        Ok(rows)
    }

    /// Calendar entries for `viewer`: each open slot, plus each active or
    /// completed reservation the viewer is allowed to see. Volunteers only
    /// see their own reservations; slots claimed by someone else are left
    /// out for them. Completed walks show as `Past`.
    pub async fn calendar_feed(&self, viewer: &Actor) -> WalkResult<Vec<CalendarEntry>> {
        let now = self.clock.now();
        let slots = self.slots.list_slots(None).await?;
        let holding = self
            .requests
            .list_requests(&RequestFilter {
                status_in: Some(ReservationStatus::HOLDING.to_vec()),
                ..Default::default()
            })
            .await?;

        let mut active: HashMap<Uuid, ReservationRequest> = HashMap::new();
        for request in holding {
            if let Some(kept) = active.get(&request.slot_id) {
                warn!(
                    slot_id = %request.slot_id,
                    kept = %kept.id,
                    ignored = %request.id,
                    "Slot is held by more than one reservation"
                );
                continue;
            }
            active.insert(request.slot_id, request);
        }

        let animal_ids = distinct(slots.iter().map(|slot| slot.animal_id));
        let animals = self.animals.animals(&animal_ids).await?;

        let mut entries = Vec::new();
        for slot in &slots {
            let reservation = active.get(&slot.id);
            let category = match reservation {
                Some(request)
                    if viewer.role.is_volunteer() && request.requester_id != viewer.id =>
                {
                    continue;
                }
                Some(request) => match CalendarCategory::for_status(request.status) {
                    Some(category) => category,
                    None => continue,
                },
                None => CalendarCategory::Open,
            };

            let ended = slot.range().has_ended(now)
                || reservation
                    .is_some_and(|request| request.status == ReservationStatus::Completed);
            let category = if ended { CalendarCategory::Past } else { category };

            entries.push(CalendarEntry {
                slot_id: slot.id,
                reservation_id: reservation.map(|request| request.id),
                animal_id: slot.animal_id,
                title: animals
                    .get(&slot.animal_id)
                    .map(|animal| animal.name.clone())
                    .unwrap_or_else(|| UNKNOWN_ANIMAL.to_string()),
                start_time: slot.start_time,
                end_time: slot.end_time,
                category,
                color: category.color().to_string(),
                read_only: ended,
            });
        }

        Ok(entries)
    }

    async fn slots_by_id(&self) -> WalkResult<HashMap<Uuid, Slot>> {
        Ok(self
            .slots
            .list_slots(None)
            .await?
            .into_iter()
            .map(|slot| (slot.id, slot))
            .collect())
    }
}

fn distinct(ids: impl Iterator<Item = Uuid>) -> Vec<Uuid> {
    ids.collect::<BTreeSet<_>>().into_iter().collect()
}
