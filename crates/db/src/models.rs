use chrono::NaiveDateTime;
use eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use shelterwalk_core::models::{
    directory::{AnimalProfile, PersonProfile},
    reservation::{ReservationRequest, ReservationStatus},
    slot::Slot,
};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSlot {
    pub id: Uuid,
    pub animal_id: Uuid,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

impl From<DbSlot> for Slot {
    fn from(row: DbSlot) -> Self {
        Slot {
            id: row.id,
            animal_id: row.animal_id,
            start_time: row.start_time,
            end_time: row.end_time,
            created_at: row.created_at,
        }
    }
}

/// `status` is stored as its numeric code.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReservationRequest {
    pub id: Uuid,
    pub slot_id: Uuid,
    pub requester_id: Uuid,
    pub request_date: NaiveDateTime,
    pub status: i16,
}

impl TryFrom<DbReservationRequest> for ReservationRequest {
    type Error = eyre::Report;

    fn try_from(row: DbReservationRequest) -> Result<Self> {
        let status = ReservationStatus::try_from(row.status).map_err(|_| {
            eyre!(
                "Reservation {} has unknown status code {}",
                row.id,
                row.status
            )
        })?;

        Ok(ReservationRequest {
            id: row.id,
            slot_id: row.slot_id,
            requester_id: row.requester_id,
            request_date: row.request_date,
            status,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAnimal {
    pub id: Uuid,
    pub name: String,
}

impl From<DbAnimal> for AnimalProfile {
    fn from(row: DbAnimal) -> Self {
        AnimalProfile {
            id: row.id,
            name: row.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<DbUser> for PersonProfile {
    fn from(row: DbUser) -> Self {
        PersonProfile {
            id: row.id,
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
        }
    }
}
