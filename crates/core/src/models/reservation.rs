use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::WalkError;

/// Lifecycle status of a reservation request.
///
/// The numeric codes are the persisted representation and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
    InProgress,
    Canceled,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 6] = [
        ReservationStatus::Pending,
        ReservationStatus::Approved,
        ReservationStatus::Rejected,
        ReservationStatus::Completed,
        ReservationStatus::InProgress,
        ReservationStatus::Canceled,
    ];

    /// Statuses that still hold a claim on the slot.
    pub const ACTIVE: [ReservationStatus; 3] = [
        ReservationStatus::Pending,
        ReservationStatus::Approved,
        ReservationStatus::InProgress,
    ];

    /// Statuses that keep the slot off the market. A completed walk consumes
    /// its slot until the request is deleted.
    pub const HOLDING: [ReservationStatus; 4] = [
        ReservationStatus::Pending,
        ReservationStatus::Approved,
        ReservationStatus::InProgress,
        ReservationStatus::Completed,
    ];

    pub fn code(self) -> i16 {
        match self {
            ReservationStatus::Pending => 0,
            ReservationStatus::Approved => 1,
            ReservationStatus::Rejected => 2,
            ReservationStatus::Completed => 3,
            ReservationStatus::InProgress => 4,
            ReservationStatus::Canceled => 5,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ReservationStatus::Rejected | ReservationStatus::Completed | ReservationStatus::Canceled
        )
    }

    pub fn is_active(self) -> bool {
        !self.is_terminal()
    }

    pub fn holds_slot(self) -> bool {
        self.is_active() || self == ReservationStatus::Completed
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReservationStatus::Pending => "PENDING",
            ReservationStatus::Approved => "APPROVED",
            ReservationStatus::Rejected => "REJECTED",
            ReservationStatus::Completed => "COMPLETED",
            ReservationStatus::InProgress => "IN_PROGRESS",
            ReservationStatus::Canceled => "CANCELED",
        }
    }

    /// Label shown in walk history tables.
    pub fn label(self) -> &'static str {
        match self {
            ReservationStatus::Pending => "Pending approval",
            ReservationStatus::Approved => "Approved",
            ReservationStatus::Rejected => "Rejected",
            ReservationStatus::Completed => "Completed",
            ReservationStatus::InProgress => "In Progress",
            ReservationStatus::Canceled => "Canceled",
        }
    }

    /// Parses either the upper-case name or the numeric code.
    pub fn parse(value: &str) -> Result<Self, WalkError> {
        let value = value.trim();
        if let Ok(code) = value.parse::<i16>() {
            return Self::try_from(code);
        }
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| WalkError::Validation(format!("Unknown reservation status '{}'", value)))
    }
}

impl TryFrom<i16> for ReservationStatus {
    type Error = WalkError;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|status| status.code() == code)
            .ok_or_else(|| WalkError::Validation(format!("Unknown reservation status code {}", code)))
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A volunteer's claim against exactly one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRequest {
    pub id: Uuid,
    pub slot_id: Uuid,
    pub requester_id: Uuid,
    pub request_date: NaiveDateTime,
    pub status: ReservationStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestFilter {
    pub requester_id: Option<Uuid>,
    pub slot_id: Option<Uuid>,
    pub status_in: Option<Vec<ReservationStatus>>,
}

impl RequestFilter {
    pub fn matches(&self, request: &ReservationRequest) -> bool {
        self.requester_id.is_none_or(|id| request.requester_id == id)
            && self.slot_id.is_none_or(|id| request.slot_id == id)
            && self
                .status_in
                .as_ref()
                .is_none_or(|statuses| statuses.contains(&request.status))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    pub slot_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ReservationStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionsResponse {
    pub reservation_id: Uuid,
    pub current: ReservationStatus,
    pub allowed: Vec<ReservationStatus>,
}
