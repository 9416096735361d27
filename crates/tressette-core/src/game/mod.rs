pub mod config;
pub mod deal;
pub mod engine;
pub mod error;
pub mod events;
pub mod roster;
pub mod schedule;
pub mod snapshot;
