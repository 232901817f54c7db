//! # obs_core - Team-symmetric observation encoder for vehicle-soccer agents
//!
//! Turns one `GameState` snapshot into a flat `f32` feature vector per player,
//! for feeding a reinforcement-learning policy.
//!
//! ## Features
//! - Deterministic: same snapshot and player, same bytes
//! - Team symmetric: orange observers see the arena mirrored into blue's frame
//! - Fixed, documented layouts (`ObservationBuilder::layout`)
//! - Snapshots and configs load from JSON or YAML

pub mod engine;
pub mod error;

#[cfg(test)]
mod test_support;

pub use engine::config::{ObsConfig, PaddingConfig};
pub use engine::game_state::{GameState, Player};
pub use engine::observation::{
    build_obs_all, AdvancedObs, ExtendedObs, ObsBuilderKind, ObsLayout, ObservationBuilder, Observation,
    PaddedObs,
};
pub use engine::types::{PhysState, PrevAction, RotMat, Team};
pub use error::{ObsError, Result};
