pub mod actor;
pub mod directory;
pub mod reservation;
pub mod schedule;
pub mod slot;
