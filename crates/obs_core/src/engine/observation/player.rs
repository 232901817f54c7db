//! Player encoder
//!
//! Fixed 30-value block for one car, relative to the (already inverted) ball.
//! Used for the observer, each teammate and each opponent.

use super::common::invert_player_phys;
use super::writer::ObsWriter;
use crate::engine::config::ObsConfig;
use crate::engine::game_state::Player;
use crate::engine::types::PhysState;

/// Values per player block
pub const PLAYER_OBS_LEN: usize = 30;

/// Fields of a player block, in order, with their widths
///
/// `is_supersonic` is the 30th value. The C++ AdvancedObs in the training
/// stack emits only the first 29, so its vectors are not interchangeable
/// with these.
pub const PLAYER_FIELDS: [(&str, usize); 14] = [
    ("pos", 3),
    ("forward", 3),
    ("up", 3),
    ("vel", 3),
    ("ang_vel", 3),
    ("local_ang_vel", 3),
    ("local_ball_pos", 3),
    ("local_ball_vel", 3),
    ("boost", 1),
    ("on_ground", 1),
    ("has_flip_or_jump", 1),
    ("is_demoed", 1),
    ("has_jumped", 1),
    ("is_supersonic", 1),
];

/// Append one player block.
///
/// `ball` must already be in the observer's frame; `inverted` applies to the
/// player's own physics.
pub fn add_player_to_obs(
    out: &mut ObsWriter,
    player: &Player,
    inverted: bool,
    ball: &PhysState,
    cfg: &ObsConfig,
) {
    let phys = invert_player_phys(player, inverted);
    let rot = &phys.rot_mat;

    out.push_vec3(&phys.pos, cfg.pos_coef);
    out.push_vec3(&rot.forward(), 1.0);
    out.push_vec3(&rot.up(), 1.0);
    out.push_vec3(&phys.vel, cfg.vel_coef);
    out.push_vec3(&phys.ang_vel, cfg.ang_vel_coef);
    out.push_vec3(&rot.dot(&phys.ang_vel), cfg.ang_vel_coef);

    out.push_vec3(&rot.dot(&(ball.pos - phys.pos)), cfg.pos_coef);
    out.push_vec3(&rot.dot(&(ball.vel - phys.vel)), cfg.vel_coef);

    out.push(player.boost_fraction());
    out.push_flag(player.on_ground);
    out.push_flag(player.has_flip_or_jump());
    out.push_flag(player.is_demoed);
    // Kept apart from has_flip_or_jump so flip resets are visible
    out.push_flag(player.has_jumped);
    out.push_flag(player.is_supersonic());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::{RotMat, Team};
    use nalgebra::Vector3;

    fn encode(player: &Player, inverted: bool, ball: &PhysState) -> Vec<f32> {
        let mut w = ObsWriter::with_capacity(PLAYER_OBS_LEN);
        add_player_to_obs(&mut w, player, inverted, ball, &ObsConfig::default());
        w.finish(PLAYER_OBS_LEN).into_vec()
    }

    #[test]
    fn test_field_widths_sum_to_block_len() {
        assert_eq!(PLAYER_FIELDS.iter().map(|(_, n)| n).sum::<usize>(), PLAYER_OBS_LEN);
    }

    #[test]
    fn test_scaled_scenario() {
        // Ball at rest at origin; car at (5000,0,0) going 2300 along +X, facing +X
        let ball = PhysState::default();
        let phys = PhysState::at(Vector3::new(5000.0, 0.0, 0.0)).with_vel(Vector3::new(2300.0, 0.0, 0.0));
        let mut player = Player::new(1, Team::Blue, phys);
        player.boost = 50.0;

        let v = encode(&player, false, &ball);
        assert_eq!(v.len(), PLAYER_OBS_LEN);

        let close = |a: &[f32], b: &[f32]| a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-5);
        assert!(close(&v[0..3], &[1.0, 0.0, 0.0]));
        assert!(close(&v[3..6], &[1.0, 0.0, 0.0]));
        assert!(close(&v[6..9], &[0.0, 0.0, 1.0]));
        assert!(close(&v[9..12], &[1.0, 0.0, 0.0]));
        assert!(close(&v[15..18], &[0.0, 0.0, 0.0]));
        // Ball is straight behind: local x = -1
        assert!(close(&v[18..21], &[-1.0, 0.0, 0.0]));
        assert!(close(&v[21..24], &[-1.0, 0.0, 0.0]));
        assert!((v[24] - 0.5).abs() < 1e-6);
        assert_eq!(&v[25..30], &[1.0, 1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_local_ang_vel_uses_own_frame() {
        // Facing +Y, spinning around world +Y: locally that is a roll around forward
        let rot = RotMat::from_axes(
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        );
        let phys = PhysState::at(Vector3::zeros()).with_rot_mat(rot).with_ang_vel(Vector3::new(0.0, 3.0, 0.0));
        let player = Player::new(1, Team::Blue, phys);

        let v = encode(&player, false, &PhysState::default());
        assert!((v[12] - 0.0).abs() < 1e-6 && (v[13] - 1.0).abs() < 1e-6);
        assert!((v[15] - 1.0).abs() < 1e-6);
        assert!(v[16].abs() < 1e-6 && v[17].abs() < 1e-6);
    }

    #[test]
    fn test_flags_follow_player_state() {
        let mut player = Player::new(1, Team::Orange, PhysState::default());
        player.on_ground = false;
        player.has_jumped = true;
        player.has_flipped = true;
        player.is_demoed = true;
        player.boost = 100.0;

        let v = encode(&player, true, &PhysState::default());
        assert_eq!(&v[24..30], &[1.0, 0.0, 0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_inverted_player_and_ball_give_same_relative_block() {
        let ball = PhysState::at(Vector3::new(100.0, 2000.0, 93.0)).with_vel(Vector3::new(0.0, -300.0, 0.0));
        let phys = PhysState::at(Vector3::new(-500.0, 3000.0, 17.0))
            .with_vel(Vector3::new(200.0, -1000.0, 0.0))
            .with_rot_mat(RotMat::from_euler(0.0, -1.3, 0.0));
        let player = Player::new(3, Team::Orange, phys);

        let direct = encode(&player, false, &ball);
        let inverted = encode(&player, true, &ball.invert());

        // Local, ball-relative features are frame independent
        for i in 15..30 {
            assert!((direct[i] - inverted[i]).abs() < 1e-5, "index {}", i);
        }
        // World features are mirrored on X and Y
        assert!((direct[0] + inverted[0]).abs() < 1e-6);
        assert!((direct[1] + inverted[1]).abs() < 1e-6);
        assert!((direct[2] - inverted[2]).abs() < 1e-6);
    }
}
