pub mod health;
pub mod reservations;
pub mod schedule;
pub mod slots;
