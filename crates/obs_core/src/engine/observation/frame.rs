//! Frame-level encoder: ball physics and global context

use super::common::blend_boost_pad;
use super::writer::ObsWriter;
use crate::engine::config::ObsConfig;
use crate::engine::types::{PhysState, PrevAction};

/// Ball position, velocity, angular velocity
pub const BALL_OBS_LEN: usize = 9;

/// Append ball pos/vel/ang_vel, scaled. `ball` is already in the observer's frame.
pub fn add_ball_to_obs(out: &mut ObsWriter, ball: &PhysState, cfg: &ObsConfig) {
    out.section("ball.pos");
    out.push_vec3(&ball.pos, cfg.pos_coef);
    out.section("ball.vel");
    out.push_vec3(&ball.vel, cfg.vel_coef);
    out.section("ball.ang_vel");
    out.push_vec3(&ball.ang_vel, cfg.ang_vel_coef);
}

/// Append the observer's previous controls, in channel order.
pub fn add_prev_action_to_obs(out: &mut ObsWriter, prev_action: &PrevAction) {
    out.section("prev_action");
    out.extend(prev_action.as_slice());
}

/// Append one blended value per pad, in table order.
///
/// Pads past the end of `timers` are treated as having no timer.
pub fn add_boost_pads_to_obs(out: &mut ObsWriter, pads: &[bool], timers: &[f32]) {
    out.section("boost_pads");
    for (i, &available) in pads.iter().enumerate() {
        let timer = timers.get(i).copied().unwrap_or(0.0);
        out.push(blend_boost_pad(available, timer));
    }
}
