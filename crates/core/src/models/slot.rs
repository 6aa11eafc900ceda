use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::time_range::TimeRange;

/// A window in which one animal may be taken for a walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: Uuid,
    pub animal_id: Uuid,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

impl Slot {
    pub fn range(&self) -> TimeRange {
        TimeRange::from_trusted(self.start_time, self.end_time)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotFilter {
    pub animal_id: Option<Uuid>,
    #[serde(default)]
    pub include_past: bool,
    #[serde(default)]
    pub only_open: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSlotRequest {
    pub animal_id: Uuid,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSlotRequest {
    pub animal_id: Uuid,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}
