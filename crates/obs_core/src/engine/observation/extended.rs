//! Extended Observation (1v1)
//!
//! AdvancedObs-style frame plus hand-made features for the observer: car/ball
//! geometry, goals, nearest boost pad, distance to the arena walls, and a
//! detailed view of the first opponent in the observer's own frame.
//!
//! ## Flat Vector Layout (34 pads: 158 values)
//! ```text
//! [0-8]      Ball pos, vel, ang_vel
//! [9-10]     Line shot on opponent goal, on own goal
//! [11-18]    Previous action
//! [19-52]    Boost pads
//! [53-82]    Self player block
//! [83-91]    Car/ball: dist, local dir (3), fwd align, approach, height diff, kickoff, supersonic
//! [92-103]   Goals: opp goal dist + local dir, ball→opp goal dist + dir, own goal dist + local dir
//! [104-105]  Nearest pad: dist, blended availability
//! [106-110]  Walls: side, back, ceiling, min of the three, up.z
//! [111-157]  First opponent (zeros if none)
//! ```

use nalgebra::Vector3;
use tracing::debug;

use super::advanced::opponents;
use super::builder::ObservationBuilder;
use super::common::{blend_boost_pad, invert_phys, invert_player_phys, normalize_or_zero, pad_location, should_invert};
use super::frame::{add_ball_to_obs, add_boost_pads_to_obs, add_prev_action_to_obs, BALL_OBS_LEN};
use super::player::{add_player_to_obs, PLAYER_OBS_LEN};
use super::writer::ObsWriter;
use crate::engine::config::ObsConfig;
use crate::engine::game_state::{GameState, Player};
use crate::engine::physics_constants::{car, field, kickoff};
use crate::engine::types::{PhysState, ACTION_LEN};

/// Line-shot flags after the ball block
pub const LINE_SHOTS_LEN: usize = 2;

/// Car/ball (9) + goals (12) + nearest pad (2) + walls (5)
pub const SELF_EXTRAS_LEN: usize = 28;

/// Relative pos/vel/ang_vel (9) + player block (30) + orientation (6) + align + boost
pub const OPPONENT_OBS_LEN: usize = 9 + PLAYER_OBS_LEN + 8;

/// Whether a ball on a straight line crosses `goal_y` inside the goal mouth.
///
/// Gravity and bounces are ignored. A ball barely moving in Y, or moving away
/// from `goal_y`, is never on target.
pub fn line_shot_on_target(pos: &Vector3<f32>, vel: &Vector3<f32>, goal_y: f32) -> bool {
    if vel.y.abs() < 1e-3 {
        return false;
    }
    let t = (goal_y - pos.y) / vel.y;
    if t <= 0.0 {
        return false;
    }
    let hit = pos + vel * t;
    hit.x.abs() <= field::GOAL_HALF_WIDTH && hit.z > 0.0 && hit.z <= field::GOAL_HEIGHT
}

/// Ball resting near the center spot
pub fn is_kickoff(ball: &PhysState) -> bool {
    ball.pos.x.abs() < kickoff::CENTER_TOLERANCE
        && ball.pos.y.abs() < kickoff::CENTER_TOLERANCE
        && ball.vel.norm() < kickoff::MAX_BALL_SPEED
}

/// Closest pad to `pos` as `(distance, blended availability)`.
///
/// `pads` and `timers` are the observer's side of the tables; index `i`
/// is located with [`pad_location`]. `None` when no pad has a known location.
pub fn nearest_boost_pad(pos: &Vector3<f32>, pads: &[bool], timers: &[f32], inverted: bool) -> Option<(f32, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for i in 0..pads.len() {
        let Some(loc) = pad_location(i, inverted) else { break };
        let dist2 = (loc - pos).norm_squared();
        let closer = match best {
            Some((_, d)) => dist2 < d,
            None => true,
        };
        if closer {
            best = Some((i, dist2));
        }
    }
    best.map(|(i, dist2)| {
        let timer = timers.get(i).copied().unwrap_or(0.0);
        (dist2.sqrt(), blend_boost_pad(pads[i], timer))
    })
}

/// AdvancedObs frame plus engineered self and opponent features
#[derive(Debug, Clone, Default)]
pub struct ExtendedObs {
    config: ObsConfig,
}

impl ExtendedObs {
    pub fn new(config: ObsConfig) -> Self {
        debug!(?config, "extended observation builder");
        Self { config }
    }

    fn add_line_shots(&self, out: &mut ObsWriter, ball: &PhysState) {
        out.section("ball.line_shots");
        out.push_flag(line_shot_on_target(&ball.pos, &ball.vel, field::BACK_WALL_Y));
        out.push_flag(line_shot_on_target(&ball.pos, &ball.vel, -field::BACK_WALL_Y));
    }

    fn add_car_ball_extras(&self, out: &mut ObsWriter, player: &Player, phys: &PhysState, ball: &PhysState) {
        out.section("self.ball");
        let to_ball = ball.pos - phys.pos;
        let dir = normalize_or_zero(&to_ball);

        out.push(to_ball.norm() * self.config.pos_coef);
        out.push_vec3(&phys.rot_mat.dot(&dir), 1.0);
        out.push(phys.rot_mat.forward().dot(&dir));
        out.push(phys.vel.dot(&dir).max(0.0) / car::MAX_SPEED);
        out.push((ball.pos.z - phys.pos.z) * self.config.pos_coef);
        out.push_flag(is_kickoff(ball));
        out.push_flag(player.is_supersonic());
    }

    fn add_goal_features(&self, out: &mut ObsWriter, phys: &PhysState, ball: &PhysState) {
        out.section("self.goals");
        let opp_goal = Vector3::new(0.0, field::BACK_WALL_Y, 0.0);
        let own_goal = Vector3::new(0.0, -field::BACK_WALL_Y, 0.0);
        let pos_coef = self.config.pos_coef;

        let car_to_opp = opp_goal - phys.pos;
        out.push(car_to_opp.norm() * pos_coef);
        out.push_vec3(&phys.rot_mat.dot(&normalize_or_zero(&car_to_opp)), 1.0);

        // World frame, not car frame
        let ball_to_opp = opp_goal - ball.pos;
        out.push(ball_to_opp.norm() * pos_coef);
        out.push_vec3(&normalize_or_zero(&ball_to_opp), 1.0);

        let car_to_own = own_goal - phys.pos;
        out.push(car_to_own.norm() * pos_coef);
        out.push_vec3(&phys.rot_mat.dot(&normalize_or_zero(&car_to_own)), 1.0);
    }

    fn add_nearest_boost(&self, out: &mut ObsWriter, phys: &PhysState, state: &GameState, inverted: bool) {
        out.section("self.nearest_boost");
        match nearest_boost_pad(&phys.pos, state.boost_pads(inverted), state.boost_pad_timers(inverted), inverted) {
            Some((dist, avail)) => {
                out.push(dist * self.config.pos_coef);
                out.push(avail);
            }
            None => out.push_zeros(2),
        }
    }

    fn add_field_proximity(&self, out: &mut ObsWriter, phys: &PhysState) {
        out.section("self.field");
        let dx = field::SIDE_WALL_X - phys.pos.x.abs();
        let dy = field::BACK_WALL_Y - phys.pos.y.abs();
        let dz = field::CEILING_Z - phys.pos.z;
        let pos_coef = self.config.pos_coef;

        out.push(dx * pos_coef);
        out.push(dy * pos_coef);
        out.push(dz * pos_coef);
        out.push(dx.min(dy).min(dz) * pos_coef);
        out.push(phys.rot_mat.up().z);
    }

    /// Opponent seen from the observer's car; all vectors in the observer's frame.
    fn add_opponent(
        &self,
        out: &mut ObsWriter,
        opponent: Option<&Player>,
        phys: &PhysState,
        ball: &PhysState,
        inverted: bool,
    ) {
        out.section("opponent");
        let Some(opp) = opponent else {
            out.push_zeros(OPPONENT_OBS_LEN);
            return;
        };

        let cfg = &self.config;
        let rot = &phys.rot_mat;
        let opp_phys = invert_player_phys(opp, inverted);

        out.push_vec3(&rot.dot(&(opp_phys.pos - phys.pos)), cfg.pos_coef);
        out.push_vec3(&rot.dot(&(opp_phys.vel - phys.vel)), cfg.vel_coef);
        out.push_vec3(&rot.dot(&opp_phys.ang_vel), cfg.ang_vel_coef);

        add_player_to_obs(out, opp, inverted, ball, cfg);

        let opp_fwd = opp_phys.rot_mat.forward();
        out.push_vec3(&rot.dot(&opp_fwd), 1.0);
        out.push_vec3(&rot.dot(&opp_phys.rot_mat.up()), 1.0);
        out.push(opp_fwd.dot(&normalize_or_zero(&(ball.pos - opp_phys.pos))));
        out.push(opp.boost_fraction());
    }
}

impl ObservationBuilder for ExtendedObs {
    fn name(&self) -> &'static str {
        "extended"
    }

    fn config(&self) -> &ObsConfig {
        &self.config
    }

    fn obs_len(&self, _player: &Player, state: &GameState) -> usize {
        BALL_OBS_LEN
            + LINE_SHOTS_LEN
            + ACTION_LEN
            + state.boost_pad_count()
            + PLAYER_OBS_LEN
            + SELF_EXTRAS_LEN
            + OPPONENT_OBS_LEN
    }

    fn encode(&self, player: &Player, state: &GameState, out: &mut ObsWriter) {
        let inverted = should_invert(player.team);
        let ball = invert_phys(&state.ball, inverted);
        let phys = invert_player_phys(player, inverted);

        add_ball_to_obs(out, &ball, &self.config);
        self.add_line_shots(out, &ball);
        add_prev_action_to_obs(out, &player.prev_action);
        add_boost_pads_to_obs(out, state.boost_pads(inverted), state.boost_pad_timers(inverted));

        out.section("self");
        add_player_to_obs(out, player, inverted, &ball, &self.config);
        self.add_car_ball_extras(out, player, &phys, &ball);
        self.add_goal_features(out, &phys, &ball);
        self.add_nearest_boost(out, &phys, state, inverted);
        self.add_field_proximity(out, &phys);

        self.add_opponent(out, opponents(player, state).next(), &phys, &ball, inverted);
    }
}

// =============================================================================
// Tests
// =============================================================================
