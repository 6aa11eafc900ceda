//! # Shelter walk scheduling core
//!
//! Domain types and rules for publishing walk slots and reserving them:
//!
//! - [`time_range`] and [`clock`]: interval validation and the notion of "now"
//! - [`state_machine`]: legal reservation status changes and who may make them
//! - [`services`]: the slot store, reservation store and schedule aggregator
//! - [`repository`]: storage traits, implemented by `shelterwalk-db` and [`memory`]

pub mod clock;
pub mod errors;
pub mod memory;
pub mod models;
pub mod repository;
pub mod services;
pub mod state_machine;
pub mod time_range;
