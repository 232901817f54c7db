//! PrevAction: last control inputs applied by a car

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Number of control channels in one action.
pub const ACTION_LEN: usize = 8;

/// Control inputs in canonical order:
/// throttle, steer, pitch, yaw, roll, jump, boost, handbrake.
///
/// Analog channels are in `[-1, 1]`, button channels are 0/1.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct PrevAction(pub [f32; ACTION_LEN]);

impl PrevAction {
    /// Channel names, same order as the values
    pub const LABELS: [&'static str; ACTION_LEN] =
        ["throttle", "steer", "pitch", "yaw", "roll", "jump", "boost", "handbrake"];

    pub const ZERO: Self = Self([0.0; ACTION_LEN]);

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}
