use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::reservation::ReservationStatus;

/// One reservation joined with its slot, animal and requester, as shown in
/// the caregiver and volunteer walk tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleOverviewRow {
    pub reservation_id: Uuid,
    pub slot_id: Uuid,
    pub animal_id: Uuid,
    pub animal_name: Option<String>,
    pub requester_id: Uuid,
    pub requester_username: Option<String>,
    pub requester_full_name: Option<String>,
    pub requester_email: Option<String>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub request_date: NaiveDateTime,
    pub status: ReservationStatus,
    pub status_label: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverviewScope {
    #[default]
    All,
    /// Requests that still hold their slot.
    Ongoing,
    /// Requests in a terminal status.
    History,
}

impl OverviewScope {
    pub fn includes(self, status: ReservationStatus) -> bool {
        match self {
            OverviewScope::All => true,
            OverviewScope::Ongoing => status.is_active(),
            OverviewScope::History => status.is_terminal(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewFilter {
    pub requester_id: Option<Uuid>,
    #[serde(default)]
    pub scope: OverviewScope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarCategory {
    Open,
    Pending,
    Approved,
    InProgress,
    Past,
}

impl CalendarCategory {
    pub fn color(self) -> &'static str {
        match self {
            CalendarCategory::Open => "green",
            CalendarCategory::Pending => "amber",
            CalendarCategory::Approved => "blue",
            CalendarCategory::InProgress => "purple",
            CalendarCategory::Past => "gray",
        }
    }

    /// A completed walk is history; rejected and canceled requests release
    /// their slot and never reach the calendar.
    pub fn for_status(status: ReservationStatus) -> Option<Self> {
        match status {
            ReservationStatus::Pending => Some(CalendarCategory::Pending),
            ReservationStatus::Approved => Some(CalendarCategory::Approved),
            ReservationStatus::InProgress => Some(CalendarCategory::InProgress),
            ReservationStatus::Completed => Some(CalendarCategory::Past),
            ReservationStatus::Rejected | ReservationStatus::Canceled => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEntry {
    pub slot_id: Uuid,
    pub reservation_id: Option<Uuid>,
    pub animal_id: Uuid,
    pub title: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub category: CalendarCategory,
    pub color: String,
    pub read_only: bool,
}
