//! Observation engine: snapshot types, arena constants, configuration and builders

pub mod config;
pub mod game_state;
pub mod observation;
pub mod physics_constants;
pub mod types;
