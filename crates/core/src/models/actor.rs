use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{WalkError, WalkResult};

/// Role of the person acting on the schedule, as resolved by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Admin,
    Caregiver,
    Vet,
    Volunteer,
    VerifiedVolunteer,
}

impl ActorRole {
    /// Roles allowed to approve, reject, start and complete walks.
    pub fn is_caregiver_equivalent(self) -> bool {
        matches!(self, ActorRole::Admin | ActorRole::Caregiver)
    }

    /// Roles allowed to publish, edit and remove slots.
    pub fn can_manage_slots(self) -> bool {
        self.is_caregiver_equivalent()
    }

    /// Roles allowed to file a reservation request against a slot.
    pub fn can_claim_slots(self) -> bool {
        matches!(self, ActorRole::Admin | ActorRole::VerifiedVolunteer)
    }

    /// Volunteers only ever see their own requests.
    pub fn is_volunteer(self) -> bool {
        matches!(self, ActorRole::Volunteer | ActorRole::VerifiedVolunteer)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActorRole::Admin => "admin",
            ActorRole::Caregiver => "caregiver",
            ActorRole::Vet => "vet",
            ActorRole::Volunteer => "volunteer",
            ActorRole::VerifiedVolunteer => "verified_volunteer",
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActorRole {
    type Err = WalkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(ActorRole::Admin),
            "caregiver" => Ok(ActorRole::Caregiver),
            "vet" => Ok(ActorRole::Vet),
            "volunteer" => Ok(ActorRole::Volunteer),
            "verified_volunteer" => Ok(ActorRole::VerifiedVolunteer),
            other => Err(WalkError::Unauthenticated(format!("Unknown role '{}'", other))),
        }
    }
}

/// The caller of a mutating operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: Uuid,
    pub role: ActorRole,
}

impl Actor {
    pub fn new(id: Uuid, role: ActorRole) -> Self {
        Self { id, role }
    }

    pub fn ensure_can_manage_slots(&self) -> WalkResult<()> {
        if self.role.can_manage_slots() {
            Ok(())
        } else {
            Err(WalkError::Forbidden(format!(
                "Role {} cannot manage walk slots",
                self.role
            )))
        }
    }

    pub fn ensure_can_claim_slots(&self) -> WalkResult<()> {
        if self.role.can_claim_slots() {
            Ok(())
        } else {
            Err(WalkError::Forbidden(format!(
                "Role {} cannot reserve walk slots",
                self.role
            )))
        }
    }

    /// Volunteers may only look at records they own; everyone else sees all.
    pub fn ensure_can_view(&self, owner_id: Uuid) -> WalkResult<()> {
        if !self.role.is_volunteer() || self.id == owner_id {
            Ok(())
        } else {
            Err(WalkError::Forbidden(
                "Volunteers can only view their own reservations".to_string(),
            ))
        }
    }
}
