//! Observation Module - per-player feature vectors from a GameState snapshot
//!
//! ## Design Principles
//!
//! 1. **Snapshot only**: builders read a `GameState` and nothing else
//! 2. **Blue frame**: orange observers see the arena mirrored on X and Y, and
//!    their side of the boost pad tables
//! 3. **Fixed order**: ball, previous action, pads, self, teammates, opponents
//!
//! ## Available Builders
//!
//! - `AdvancedObs`: one 30-value block per car (231 floats for 3v3)
//! - `PaddedObs`: AdvancedObs with fixed, zero-filled player slots
//! - `ExtendedObs`: 1v1 vector with goal, boost, wall and opponent features (158 floats)
//!
//! ## Usage
//!
//! ```rust
//! use obs_core::engine::game_state::{GameState, Player};
//! use obs_core::engine::observation::{AdvancedObs, ObservationBuilder};
//! use obs_core::engine::types::{PhysState, Team};
//!
//! let players = vec![
//!     Player::new(1, Team::Blue, PhysState::default()),
//!     Player::new(2, Team::Orange, PhysState::default()),
//! ];
//! let state = GameState::new(PhysState::default(), players, vec![true; 34], vec![0.0; 34]);
//!
//! let obs = AdvancedObs::default().build(&state.players[0], &state);
//! assert_eq!(obs.len(), 9 + 8 + 34 + 2 * 30);
//! ```

mod advanced;
mod builder;
mod common;
mod extended;
mod frame;
mod padded;
mod player;
mod writer;

pub use advanced::{opponents, teammates, AdvancedObs};
pub use builder::{build_obs_all, ObservationBuilder};
pub use common::{blend_boost_pad, flag, invert_phys, invert_player_phys, normalize_or_zero, pad_location, should_invert};
pub use extended::{
    is_kickoff, line_shot_on_target, nearest_boost_pad, ExtendedObs, LINE_SHOTS_LEN, OPPONENT_OBS_LEN,
    SELF_EXTRAS_LEN,
};
pub use frame::{add_ball_to_obs, add_boost_pads_to_obs, add_prev_action_to_obs, BALL_OBS_LEN};
pub use padded::PaddedObs;
pub use player::{add_player_to_obs, PLAYER_FIELDS, PLAYER_OBS_LEN};
pub use writer::{ObsLayout, ObsSegment, ObsWriter, Observation};

use crate::engine::config::ObsConfig;
use crate::engine::game_state::{GameState, Player};
use crate::error::{ObsError, Result};

/// Any of the builders, picked by name at runtime
#[derive(Debug, Clone)]
pub enum ObsBuilderKind {
    Advanced(AdvancedObs),
    Padded(PaddedObs),
    Extended(ExtendedObs),
}

impl ObsBuilderKind {
    pub const NAMES: [&'static str; 3] = ["advanced", "padded", "extended"];

    pub fn from_name(name: &str, config: ObsConfig) -> Result<Self> {
        match name {
            "advanced" => Ok(Self::Advanced(AdvancedObs::new(config))),
            "padded" => Ok(Self::Padded(PaddedObs::new(config))),
            "extended" => Ok(Self::Extended(ExtendedObs::new(config))),
            other => Err(ObsError::InvalidConfig(format!(
                "unknown observation builder '{}', expected one of {:?}",
                other,
                Self::NAMES
            ))),
        }
    }

    fn inner(&self) -> &dyn ObservationBuilder {
        match self {
            Self::Advanced(b) => b,
            Self::Padded(b) => b,
            Self::Extended(b) => b,
        }
    }
}

impl ObservationBuilder for ObsBuilderKind {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn config(&self) -> &ObsConfig {
        self.inner().config()
    }

    fn obs_len(&self, player: &Player, state: &GameState) -> usize {
        self.inner().obs_len(player, state)
    }

    fn encode(&self, player: &Player, state: &GameState, out: &mut ObsWriter) {
        self.inner().encode(player, state, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_state;

    #[test]
    fn test_kind_from_name() {
        for name in ObsBuilderKind::NAMES {
            let kind = ObsBuilderKind::from_name(name, ObsConfig::default()).unwrap();
            assert_eq!(kind.name(), name);
        }
        let err = ObsBuilderKind::from_name("minimap", ObsConfig::default()).unwrap_err();
        assert!(matches!(err, ObsError::InvalidConfig(_)));
    }

    #[test]
    fn test_kind_delegates() {
        let state = sample_state(1, 1);
        let player = &state.players[0];
        let kind = ObsBuilderKind::from_name("extended", ObsConfig::duel()).unwrap();

        assert_eq!(kind.build(player, &state), ExtendedObs::new(ObsConfig::duel()).build(player, &state));
        assert_eq!(kind.config().padding.max_opponents, 1);
        assert_eq!(kind.layout(player, &state).len(), 158);
    }

    #[test]
    fn test_build_all_through_trait_object() {
        let state = sample_state(2, 2);
        let builder: Box<dyn ObservationBuilder> = Box::new(PaddedObs::new(ObsConfig::doubles()));
        let all = build_obs_all(builder.as_ref(), &state);
        assert_eq!(all.len(), 4);
        assert!(all.iter().all(|o| o.len() == builder.obs_len(&state.players[0], &state)));
    }
}
