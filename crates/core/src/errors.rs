use thiserror::Error;

use crate::models::{actor::ActorRole, reservation::ReservationStatus};

#[derive(Error, Debug)]
pub enum WalkError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Illegal status transition from {from} to {to}")]
    IllegalTransition {
        from: ReservationStatus,
        to: ReservationStatus,
    },

    #[error("Role {role} may not move a reservation from {from} to {to}")]
    ForbiddenTransition {
        from: ReservationStatus,
        to: ReservationStatus,
        role: ActorRole,
    },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Authentication error: {0}")]
    Unauthenticated(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl WalkError {
    /// Whether the caller can fix the input and retry straight away.
    pub fn is_caller_correctable(&self) -> bool {
        matches!(self, WalkError::Validation(_) | WalkError::NotFound(_))
    }
}

pub type WalkResult<T> = Result<T, WalkError>;
