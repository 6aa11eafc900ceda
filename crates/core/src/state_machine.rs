//! # Reservation state machine
//!
//! Every status change a reservation request can go through, together with
//! who is allowed to make it. The table is the single source of truth: the
//! request store consults it before writing a status and the API exposes
//! [`available_transitions`] so that clients never re-derive the rules.
//!
//! ```text
//! PENDING ──► APPROVED ──► IN_PROGRESS ──► COMPLETED
//!    │  │         │
//!    │  └► REJECTED
//!    └──────┴──► CANCELED
//! ```

use crate::errors::{WalkError, WalkResult};
use crate::models::{actor::ActorRole, reservation::ReservationStatus};

/// Who may take a given edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionRule {
    CaregiverOnly,
    RequesterOrCaregiver,
}

impl TransitionRule {
    pub fn permits(self, role: ActorRole, is_owner: bool) -> bool {
        match self {
            TransitionRule::CaregiverOnly => role.is_caregiver_equivalent(),
            TransitionRule::RequesterOrCaregiver => is_owner || role.is_caregiver_equivalent(),
        }
    }
}

use ReservationStatus::*;

const TRANSITIONS: [(ReservationStatus, ReservationStatus, TransitionRule); 6] = [
    (Pending, Approved, TransitionRule::CaregiverOnly),
    (Pending, Rejected, TransitionRule::CaregiverOnly),
    (Pending, Canceled, TransitionRule::RequesterOrCaregiver),
    (Approved, InProgress, TransitionRule::CaregiverOnly),
    (Approved, Canceled, TransitionRule::RequesterOrCaregiver),
    (InProgress, Completed, TransitionRule::CaregiverOnly),
];

/// The rule guarding `from -> to`, or `None` if the edge does not exist.
pub fn rule_for(from: ReservationStatus, to: ReservationStatus) -> Option<TransitionRule> {
    TRANSITIONS
        .iter()
        .find(|(f, t, _)| *f == from && *t == to)
        .map(|(_, _, rule)| *rule)
}

pub fn can_transition(
    from: ReservationStatus,
    to: ReservationStatus,
    role: ActorRole,
    is_owner: bool,
) -> bool {
    rule_for(from, to).is_some_and(|rule| rule.permits(role, is_owner))
}

/// Like [`can_transition`] but explains the refusal.
pub fn check_transition(
    from: ReservationStatus,
    to: ReservationStatus,
    role: ActorRole,
    is_owner: bool,
) -> WalkResult<()> {
    match rule_for(from, to) {
        None => Err(WalkError::IllegalTransition { from, to }),
        Some(rule) if rule.permits(role, is_owner) => Ok(()),
        Some(_) => Err(WalkError::ForbiddenTransition { from, to, role }),
    }
}

/// Target statuses the actor may move a request to from `from`.
pub fn available_transitions(
    from: ReservationStatus,
    role: ActorRole,
    is_owner: bool,
) -> Vec<ReservationStatus> {
    TRANSITIONS
        .iter()
        .filter(|(f, _, rule)| *f == from && rule.permits(role, is_owner))
        .map(|(_, to, _)| *to)
        .collect()
}
