//! Engine Types
//!
//! Value types shared by the game-state snapshot and the observation builders.

pub mod action;
pub mod phys_state;
pub mod rot_mat;

pub use action::{PrevAction, ACTION_LEN};
pub use phys_state::{invert_vec, PhysState, INVERT_SCALE};
pub use rot_mat::{RotMat, RotMatRepr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Team side. Blue defends -Y, orange defends +Y.
///
/// Blue is the canonical side every observation is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    #[default]
    Blue,
    Orange,
}

impl Team {
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Team::Blue => Team::Orange,
            Team::Orange => Team::Blue,
        }
    }

    /// True when this side's view has to be mirrored into the canonical frame.
    #[inline]
    pub fn is_inverted(self) -> bool {
        self == Team::Orange
    }
}
