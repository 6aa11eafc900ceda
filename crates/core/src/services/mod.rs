pub mod aggregator;
pub mod reservation_store;
pub mod slot_store;

use std::sync::Arc;

pub use aggregator::ScheduleAggregator;
pub use reservation_store::ReservationRequestStore;
pub use slot_store::SlotStore;

use crate::clock::Clock;
use crate::repository::{AnimalDirectory, PeopleDirectory, ReservationRepository, SlotRepository};

/// The three engine services wired to one storage backend.
#[derive(Clone)]
pub struct Scheduler {
    pub slots: SlotStore,
    pub reservations: ReservationRequestStore,
    pub schedule: ScheduleAggregator,
}

impl Scheduler {
    pub fn new<B>(backend: Arc<B>, clock: Arc<dyn Clock>) -> Self
    where
        B: SlotRepository + ReservationRepository + AnimalDirectory + PeopleDirectory + 'static,
    {
        let slots: Arc<dyn SlotRepository> = backend.clone();
        let requests: Arc<dyn ReservationRepository> = backend.clone();
        let animals: Arc<dyn AnimalDirectory> = backend.clone();
        let people: Arc<dyn PeopleDirectory> = backend;

        Self {
            slots: SlotStore::new(slots.clone(), requests.clone(), clock.clone()),
            reservations: ReservationRequestStore::new(
                slots.clone(),
                requests.clone(),
                clock.clone(),
            ),
            schedule: ScheduleAggregator::new(slots, requests, animals, people, clock),
        }
    }
}
