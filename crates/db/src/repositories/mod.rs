pub mod directory;
pub mod reservation;
pub mod slot;
