//! Observation Configuration

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::engine::physics_constants::{boost_pads, coef};

/// Normalisation coefficients applied to physics features
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ObsConfig {
    /// Position scale (default: 1/5000)
    pub pos_coef: f32,
    /// Linear velocity scale (default: 1/2300)
    pub vel_coef: f32,
    /// Angular velocity scale (default: 1/3)
    pub ang_vel_coef: f32,
    /// Expected pad table length (default: 34)
    #[serde(default = "default_boost_pad_count")]
    pub boost_pad_count: usize,
    /// Slot counts for the padded builder
    #[serde(default)]
    pub padding: PaddingConfig,
}

/// Fixed teammate/opponent slot counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PaddingConfig {
    /// Teammate slots (default: 2)
    pub max_teammates: usize,
    /// Opponent slots (default: 3)
    pub max_opponents: usize,
}

impl Default for PaddingConfig {
    fn default() -> Self {
        Self { max_teammates: 2, max_opponents: 3 }
    }
}

fn default_boost_pad_count() -> usize {
    boost_pads::COUNT
}

impl Default for ObsConfig {
    fn default() -> Self {
        Self {
            pos_coef: coef::POS_COEF,
            vel_coef: coef::VEL_COEF,
            ang_vel_coef: coef::ANG_VEL_COEF,
            boost_pad_count: boost_pads::COUNT,
            padding: PaddingConfig::default(),
        }
    }
}
