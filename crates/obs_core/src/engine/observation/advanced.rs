//! Advanced Observation
//!
//! Ball, previous action, blended boost pads, then one player block for the
//! observer, each teammate and each opponent. Everything is expressed in the
//! blue frame, so both teams see the same shape of world.
//!
//! ## Flat Vector Layout
//! ```text
//! [0-8]                  Ball pos, vel, ang_vel (scaled)
//! [9-16]                 Previous action (8)
//! [17 .. 17+P]           Boost pads, 1.0 or 1/(1+timer) (P = pad count)
//! next 30                Self player block
//! next 30 × teammates    Teammates, roster order
//! next 30 × opponents    Opponents, roster order
//! ```

use tracing::debug;

use super::builder::ObservationBuilder;
use super::common::{invert_phys, should_invert};
use super::frame::{add_ball_to_obs, add_boost_pads_to_obs, add_prev_action_to_obs, BALL_OBS_LEN};
use super::player::{add_player_to_obs, PLAYER_OBS_LEN};
use super::writer::ObsWriter;
use crate::engine::config::ObsConfig;
use crate::engine::game_state::{GameState, Player};
use crate::engine::types::{PhysState, ACTION_LEN};

/// Team-symmetric observation with one block per car
#[derive(Debug, Clone, Default)]
pub struct AdvancedObs {
    config: ObsConfig,
}

impl AdvancedObs {
    pub fn new(config: ObsConfig) -> Self {
        debug!(?config, "advanced observation builder");
        Self { config }
    }

    /// Length of the part before the player blocks: ball, prev action, pads
    #[inline]
    pub fn frame_len(pad_count: usize) -> usize {
        BALL_OBS_LEN + ACTION_LEN + pad_count
    }

    /// Append the teammate blocks then the opponent blocks for `player`.
    ///
    /// The roster is walked twice (teammates, then opponents) so both groups
    /// keep roster order without a scratch buffer. The observer is skipped by
    /// id, never by position.
    pub fn add_others_to_obs(
        &self,
        out: &mut ObsWriter,
        player: &Player,
        state: &GameState,
        inverted: bool,
        ball: &PhysState,
    ) {
        for (i, mate) in teammates(player, state).enumerate() {
            out.section_indexed("teammate", i);
            add_player_to_obs(out, mate, inverted, ball, &self.config);
        }
        for (i, opp) in opponents(player, state).enumerate() {
            out.section_indexed("opponent", i);
            add_player_to_obs(out, opp, inverted, ball, &self.config);
        }
    }
}

/// Other players on the observer's team, roster order
pub fn teammates<'a>(player: &'a Player, state: &'a GameState) -> impl Iterator<Item = &'a Player> + 'a {
    state.players.iter().filter(move |p| p.car_id != player.car_id && p.team == player.team)
}

/// Players on the other team, roster order
pub fn opponents<'a>(player: &'a Player, state: &'a GameState) -> impl Iterator<Item = &'a Player> + 'a {
    state.players.iter().filter(move |p| p.car_id != player.car_id && p.team != player.team)
}

impl ObservationBuilder for AdvancedObs {
    fn name(&self) -> &'static str {
        "advanced"
    }

    fn config(&self) -> &ObsConfig {
        &self.config
    }

    fn obs_len(&self, player: &Player, state: &GameState) -> usize {
        let others = state.players.iter().filter(|p| p.car_id != player.car_id).count();
        Self::frame_len(state.boost_pad_count()) + PLAYER_OBS_LEN * (1 + others)
    }

    fn encode(&self, player: &Player, state: &GameState, out: &mut ObsWriter) {
        let inverted = should_invert(player.team);

        let ball = invert_phys(&state.ball, inverted);
        let pads = state.boost_pads(inverted);
        let pad_timers = state.boost_pad_timers(inverted);

        add_ball_to_obs(out, &ball, &self.config);
        add_prev_action_to_obs(out, &player.prev_action);
        add_boost_pads_to_obs(out, pads, pad_timers);

        out.section("self");
        add_player_to_obs(out, player, inverted, &ball, &self.config);

        self.add_others_to_obs(out, player, state, inverted, &ball);
    }
}

// =============================================================================
// Tests
// =============================================================================
