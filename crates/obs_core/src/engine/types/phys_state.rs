//! PhysState: rigid-body snapshot shared by the ball and every car
//!
//! World units: uu (position), uu/s (velocity), rad/s (angular velocity).

use nalgebra::Vector3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::RotMat;

/// Axis scale that mirrors the orange half of the field onto the blue half.
///
/// A half-turn around +Z: X and Y flip sign, Z is untouched.
pub const INVERT_SCALE: Vector3<f32> = Vector3::new(-1.0, -1.0, 1.0);

/// Physics state of one body at one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PhysState {
    /// Position (uu)
    #[schemars(with = "[f32; 3]")]
    pub pos: Vector3<f32>,
    /// Orientation frame
    #[serde(default)]
    pub rot_mat: RotMat,
    /// Linear velocity (uu/s)
    #[schemars(with = "[f32; 3]")]
    pub vel: Vector3<f32>,
    /// Angular velocity (rad/s), world frame
    #[schemars(with = "[f32; 3]")]
    pub ang_vel: Vector3<f32>,
}

impl PhysState {
    /// Body at `pos`, at rest, world-aligned.
    pub fn at(pos: Vector3<f32>) -> Self {
        Self { pos, rot_mat: RotMat::IDENTITY, vel: Vector3::zeros(), ang_vel: Vector3::zeros() }
    }

    pub fn with_vel(mut self, vel: Vector3<f32>) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_ang_vel(mut self, ang_vel: Vector3<f32>) -> Self {
        self.ang_vel = ang_vel;
        self
    }

    pub fn with_rot_mat(mut self, rot_mat: RotMat) -> Self {
        self.rot_mat = rot_mat;
        self
    }

    /// Mirrored copy of this state (orange half → blue half).
    ///
    /// Applying it twice yields the original state.
    #[must_use]
    pub fn invert(&self) -> Self {
        Self {
            pos: invert_vec(&self.pos),
            rot_mat: self.rot_mat.scale_axes(&INVERT_SCALE),
            vel: invert_vec(&self.vel),
            ang_vel: invert_vec(&self.ang_vel),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.pos.iter().all(|v| v.is_finite())
            && self.vel.iter().all(|v| v.is_finite())
            && self.ang_vel.iter().all(|v| v.is_finite())
            && self.rot_mat.is_finite()
    }
}

impl Default for PhysState {
    fn default() -> Self {
        Self::at(Vector3::zeros())
    }
}

/// Mirror a single world-space vector.
#[inline]
pub fn invert_vec(v: &Vector3<f32>) -> Vector3<f32> {
    v.component_mul(&INVERT_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PhysState {
        PhysState::at(Vector3::new(1200.0, -3400.0, 17.0))
            .with_vel(Vector3::new(-500.0, 1400.0, 3.0))
            .with_ang_vel(Vector3::new(0.5, -2.0, 4.1))
            .with_rot_mat(RotMat::from_euler(0.2, 1.1, -0.4))
    }

    #[test]
    fn test_invert_flips_x_and_y_only() {
        let p = sample();
        let inv = p.invert();
        assert_eq!(inv.pos, Vector3::new(-1200.0, 3400.0, 17.0));
        assert_eq!(inv.vel, Vector3::new(500.0, -1400.0, 3.0));
        assert_eq!(inv.ang_vel, Vector3::new(-0.5, 2.0, 4.1));
        assert_eq!(inv.rot_mat.forward().z, p.rot_mat.forward().z);
        assert_eq!(inv.rot_mat.up().x, -p.rot_mat.up().x);
    }

    #[test]
    fn test_invert_is_involution() {
        let p = sample();
        let twice = p.invert().invert();
        assert!((twice.pos - p.pos).norm() < 1e-5);
        assert!((twice.vel - p.vel).norm() < 1e-5);
        assert!((twice.ang_vel - p.ang_vel).norm() < 1e-5);
        assert!((twice.rot_mat.matrix() - p.rot_mat.matrix()).norm() < 1e-5);
    }

    #[test]
    fn test_inverted_frame_stays_orthonormal() {
        let inv = sample().invert();
        assert!(inv.rot_mat.orthonormal_error() < 1e-5);
    }

    #[test]
    fn test_non_finite_detected() {
        let mut p = sample();
        assert!(p.is_finite());
        p.vel.y = f32::NAN;
        assert!(!p.is_finite());
    }
}
