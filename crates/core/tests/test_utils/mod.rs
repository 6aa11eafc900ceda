#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use shelterwalk_core::{
    clock::FixedClock,
    memory::MemoryStore,
    models::{
        actor::{Actor, ActorRole},
        directory::{AnimalProfile, PersonProfile},
    },
    services::Scheduler,
};
use uuid::Uuid;

pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub clock: Arc<FixedClock>,
    pub scheduler: Scheduler,
}

impl TestContext {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(FixedClock::new(base_time()));
        let scheduler = Scheduler::new(store.clone(), clock.clone());
        Self {
            store,
            clock,
            scheduler,
        }
    }

    pub async fn animal(&self, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.store
            .add_animal(AnimalProfile {
                id,
                name: name.to_string(),
            })
            .await;
        id
    }

    pub async fn volunteer(&self, username: &str) -> Actor {
        let actor = Actor::new(Uuid::new_v4(), ActorRole::VerifiedVolunteer);
        self.store
            .add_person(PersonProfile {
                id: actor.id,
                username: username.to_string(),
                first_name: "Jana".to_string(),
                last_name: username.to_string(),
                email: format!("{}@example.org", username),
            })
            .await;
        actor
    }
}

/// Monday 1 June 2026, 08:00 local time.
pub fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 6, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

pub fn hours_from_base(hours: i64) -> NaiveDateTime {
    base_time() + Duration::hours(hours)
}

pub fn caregiver() -> Actor {
    Actor::new(Uuid::new_v4(), ActorRole::Caregiver)
}
