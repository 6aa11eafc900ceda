pub mod reservations;
pub mod schedule;
pub mod slots;
