//! Common Observation Utilities
//!
//! Team inversion and small vector helpers shared by every builder.

use nalgebra::Vector3;

use crate::engine::game_state::Player;
use crate::engine::physics_constants::boost_pads;
use crate::engine::types::{invert_vec, PhysState, Team};

// =============================================================================
// Team inversion
// =============================================================================

/// Whether an observer on `team` sees the world mirrored
#[inline]
pub fn should_invert(team: Team) -> bool {
    team.is_inverted()
}

/// Physics in the canonical (blue) frame
///
/// `invert = false` returns an unchanged copy.
#[inline]
pub fn invert_phys(phys: &PhysState, invert: bool) -> PhysState {
    if invert {
        phys.invert()
    } else {
        *phys
    }
}

/// Player physics in the canonical frame
#[inline]
pub fn invert_player_phys(player: &Player, invert: bool) -> PhysState {
    invert_phys(&player.phys, invert)
}

/// Position of pad `index` as seen by the given side.
///
/// The orange table is the blue table reversed, so orange's pad `i` is blue's
/// pad `COUNT - 1 - i`, mirrored into the canonical frame.
pub fn pad_location(index: usize, invert: bool) -> Option<Vector3<f32>> {
    if index >= boost_pads::COUNT {
        return None;
    }
    let table_idx = if invert { boost_pads::COUNT - 1 - index } else { index };
    let loc: Vector3<f32> = boost_pads::LOCATIONS[table_idx].into();
    Some(if invert { invert_vec(&loc) } else { loc })
}

// =============================================================================
// Boost pad blending
// =============================================================================

/// Pad availability blended with its respawn timer.
///
/// `1.0` when available, otherwise `1 / (1 + timer)`, which approaches 1 as the
/// pad comes back. Always in `(0, 1]` for `timer >= 0`.
#[inline]
pub fn blend_boost_pad(available: bool, timer: f32) -> f32 {
    if available {
        1.0
    } else {
        1.0 / (1.0 + timer)
    }
}

// =============================================================================
// Vector utilities
// =============================================================================

/// Unit vector, or zero for near-zero input (magnitude < 1e-6)
#[inline]
pub fn normalize_or_zero(v: &Vector3<f32>) -> Vector3<f32> {
    let mag = v.norm();
    if mag < 1e-6 {
        Vector3::zeros()
    } else {
        v / mag
    }
}

#[inline]
pub fn flag(b: bool) -> f32 {
    if b {
        1.0
    } else {
        0.0
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert_phys_passthrough() {
        let p = PhysState::at(Vector3::new(1.0, 2.0, 3.0)).with_vel(Vector3::new(4.0, 5.0, 6.0));
        assert_eq!(invert_phys(&p, false), p);

        let inv = invert_phys(&p, true);
        assert_eq!(inv.pos, Vector3::new(-1.0, -2.0, 3.0));
        assert_eq!(inv.vel, Vector3::new(-4.0, -5.0, 6.0));
    }

    #[test]
    fn test_pad_location_matches_across_sides() {
        // Orange's pad i sits where blue's pad i sits, after mirroring
        for i in 0..boost_pads::COUNT {
            let blue = pad_location(i, false).unwrap();
            let orange = pad_location(i, true).unwrap();
            assert!((blue.x - orange.x).abs() < 1.0, "pad {}", i);
            assert!((blue.y - orange.y).abs() < 3.0, "pad {}", i);
        }
        assert!(pad_location(boost_pads::COUNT, false).is_none());
    }

    #[test]
    fn test_blend_boost_pad_bounds() {
        assert_eq!(blend_boost_pad(true, 9.0), 1.0);
        assert_eq!(blend_boost_pad(false, 0.0), 1.0);
        assert!((blend_boost_pad(false, 1.0) - 0.5).abs() < 1e-6);

        let mut prev = 0.0;
        for step in (0..=100).rev() {
            let timer = step as f32 * 0.1;
            let v = blend_boost_pad(false, timer);
            assert!(v > 0.0 && v <= 1.0);
            assert!(v > prev, "not increasing at timer {}", timer);
            prev = v;
        }
    }

    #[test]
    fn test_normalize_or_zero() {
        let dir = normalize_or_zero(&Vector3::new(3.0, 4.0, 0.0));
        assert!((dir.x - 0.6).abs() < 1e-6);
        assert!((dir.y - 0.8).abs() < 1e-6);

        assert_eq!(normalize_or_zero(&Vector3::zeros()), Vector3::zeros());
        assert_eq!(normalize_or_zero(&Vector3::new(1e-8, 0.0, 0.0)), Vector3::zeros());
    }

    #[cfg(feature = "proptest")]
    mod proptests {
        use super::*;
        use crate::engine::types::RotMat;
        use proptest::prelude::*;

        proptest! {
            /// Property: inverting twice restores the state
            #[test]
            fn prop_invert_involution(
                x in -4096.0f32..4096.0, y in -5120.0f32..5120.0, z in 0.0f32..2044.0,
                vx in -2300.0f32..2300.0, vy in -2300.0f32..2300.0, vz in -2300.0f32..2300.0,
                pitch in -1.5f32..1.5, yaw in -3.0f32..3.0, roll in -3.0f32..3.0,
            ) {
                let p = PhysState::at(Vector3::new(x, y, z))
                    .with_vel(Vector3::new(vx, vy, vz))
                    .with_ang_vel(Vector3::new(vz / 1000.0, vx / 1000.0, vy / 1000.0))
                    .with_rot_mat(RotMat::from_euler(pitch, yaw, roll));
                let twice = invert_phys(&invert_phys(&p, true), true);
                prop_assert!((twice.pos - p.pos).norm() < 1e-3);
                prop_assert!((twice.vel - p.vel).norm() < 1e-3);
                prop_assert!((twice.ang_vel - p.ang_vel).norm() < 1e-5);
                prop_assert!((twice.rot_mat.matrix() - p.rot_mat.matrix()).norm() < 1e-5);
            }

            /// Property: blended value stays in (0, 1]
            #[test]
            fn prop_blend_bounded(timer in 0.0f32..1.0e4, available: bool) {
                let v = blend_boost_pad(available, timer);
                prop_assert!(v > 0.0 && v <= 1.0);
                if available {
                    prop_assert_eq!(v, 1.0);
                }
            }
        }
    }
}
