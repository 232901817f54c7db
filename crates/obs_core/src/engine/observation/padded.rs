//! Padded Observation
//!
//! Same blocks as [`AdvancedObs`], but with a fixed number of teammate and
//! opponent slots so the length never depends on the roster. Empty slots are
//! zero-filled; players beyond the slot count are left out.
//!
//! ## Flat Vector Layout
//! ```text
//! [0 .. 17+P]            Ball, previous action, boost pads (as AdvancedObs)
//! next 30                Self player block
//! next 30 × T            Teammate slots (T = padding.max_teammates)
//! next 30 × O            Opponent slots (O = padding.max_opponents)
//! ```

use tracing::{debug, warn};

use super::advanced::{opponents, teammates, AdvancedObs};
use super::builder::ObservationBuilder;
use super::common::{invert_phys, should_invert};
use super::frame::{add_ball_to_obs, add_boost_pads_to_obs, add_prev_action_to_obs};
use super::player::{add_player_to_obs, PLAYER_OBS_LEN};
use super::writer::ObsWriter;
use crate::engine::config::ObsConfig;
use crate::engine::game_state::{GameState, Player};
use crate::engine::types::PhysState;

/// Fixed-width observation with zero-filled player slots
#[derive(Debug, Clone, Default)]
pub struct PaddedObs {
    config: ObsConfig,
}

impl PaddedObs {
    pub fn new(config: ObsConfig) -> Self {
        debug!(
            max_teammates = config.padding.max_teammates,
            max_opponents = config.padding.max_opponents,
            "padded observation builder"
        );
        Self { config }
    }

    /// 1v1 layout: no teammate slots, one opponent slot
    pub fn duel() -> Self {
        Self::new(ObsConfig::duel())
    }

    /// Write `slots` player blocks from `players`, zero-filling what is missing.
    ///
    /// Returns how many players did not fit.
    fn add_slots<'a>(
        &self,
        out: &mut ObsWriter,
        label: &'static str,
        slots: usize,
        players: impl Iterator<Item = &'a Player>,
        inverted: bool,
        ball: &PhysState,
    ) -> usize {
        let mut filled = 0;
        let mut dropped = 0;
        for p in players {
            if filled == slots {
                dropped += 1;
                continue;
            }
            out.section_indexed(label, filled);
            add_player_to_obs(out, p, inverted, ball, &self.config);
            filled += 1;
        }
        for slot in filled..slots {
            out.section_indexed(label, slot);
            out.push_zeros(PLAYER_OBS_LEN);
        }
        dropped
    }
}

impl ObservationBuilder for PaddedObs {
    fn name(&self) -> &'static str {
        "padded"
    }

    fn config(&self) -> &ObsConfig {
        &self.config
    }

    fn obs_len(&self, _player: &Player, state: &GameState) -> usize {
        let slots = 1 + self.config.padding.max_teammates + self.config.padding.max_opponents;
        AdvancedObs::frame_len(state.boost_pad_count()) + PLAYER_OBS_LEN * slots
    }

    fn encode(&self, player: &Player, state: &GameState, out: &mut ObsWriter) {
        let inverted = should_invert(player.team);
        let ball = invert_phys(&state.ball, inverted);

        add_ball_to_obs(out, &ball, &self.config);
        add_prev_action_to_obs(out, &player.prev_action);
        add_boost_pads_to_obs(out, state.boost_pads(inverted), state.boost_pad_timers(inverted));

        out.section("self");
        add_player_to_obs(out, player, inverted, &ball, &self.config);

        let padding = &self.config.padding;
        let extra_mates = self.add_slots(
            out,
            "teammate",
            padding.max_teammates,
            teammates(player, state),
            inverted,
            &ball,
        );
        let extra_opps = self.add_slots(
            out,
            "opponent",
            padding.max_opponents,
            opponents(player, state),
            inverted,
            &ball,
        );

        if extra_mates + extra_opps > 0 {
            warn!(
                car_id = player.car_id,
                dropped_teammates = extra_mates,
                dropped_opponents = extra_opps,
                "roster larger than padded slots"
            );
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::Team;
    use crate::test_support::{assert_close, sample_state};

    #[test]
    fn test_duel_length_is_111() {
        let state = sample_state(1, 1);
        let obs = PaddedObs::duel().build(&state.players[0], &state);
        assert_eq!(obs.len(), 9 + 8 + 34 + 30 + 30);
    }

    #[test]
    fn test_matches_advanced_when_roster_fits() {
        // Default slots (2 teammates, 3 opponents) are exactly a 3v3 roster
        let state = sample_state(3, 3);
        for p in &state.players {
            let padded = PaddedObs::default().build(p, &state);
            let advanced = AdvancedObs::default().build(p, &state);
            assert_close(&padded, &advanced, 0.0);
        }
    }

    #[test]
    fn test_short_roster_leaves_trailing_slot_empty() {
        let state = sample_state(3, 2);
        let padded = PaddedObs::default().build(&state.players[0], &state);
        let advanced = AdvancedObs::default().build(&state.players[0], &state);

        assert_eq!(padded.len(), advanced.len() + PLAYER_OBS_LEN);
        assert_close(&padded[..advanced.len()], &advanced, 0.0);
        assert!(padded[advanced.len()..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_missing_opponent_is_zero_filled() {
        let state = sample_state(1, 0);
        let builder = PaddedObs::duel();
        let obs = builder.build(&state.players[0], &state);
        assert_eq!(obs.len(), 111);
        assert!(obs[81..].iter().all(|&v| v == 0.0));

        let layout = builder.layout(&state.players[0], &state);
        assert_eq!(layout.find("opponent[0]").map(|s| (s.offset, s.len)), Some((81, 30)));
    }

    #[test]
    fn test_surplus_players_dropped() {
        // Two opponents but only one slot: the first in roster order wins
        let state = sample_state(1, 2);
        let duel = PaddedObs::duel().build(&state.players[0], &state);
        let advanced = AdvancedObs::default().build(&state.players[0], &state);

        assert_eq!(duel.len(), 111);
        assert_close(&duel, &advanced[..111], 0.0);
    }

    #[test]
    fn test_length_independent_of_roster() {
        let builder = PaddedObs::new(ObsConfig::with_padding(2, 3));
        let lens: Vec<usize> = [(1, 1), (2, 2), (3, 3), (3, 1)]
            .iter()
            .map(|&(b, o)| {
                let state = sample_state(b, o);
                builder.build(&state.players[0], &state).len()
            })
            .collect();
        assert!(lens.iter().all(|&l| l == 9 + 8 + 34 + 6 * 30), "{:?}", lens);
    }

    #[test]
    fn test_orange_observer_slots() {
        let state = sample_state(2, 2);
        let orange = state.players.iter().find(|p| p.team == Team::Orange).unwrap();
        let builder = PaddedObs::new(ObsConfig::doubles());
        let layout = builder.layout(orange, &state);

        assert_eq!(layout.with_prefix("teammate").count(), 1);
        assert_eq!(layout.with_prefix("opponent").count(), 2);
        assert_eq!(layout.len(), builder.obs_len(orange, &state));
    }
}
