//! RotMat: orthonormal orientation frame
//!
//! Columns are the body basis vectors expressed in world space:
//! - column 0: forward
//! - column 1: right
//! - column 2: up

use nalgebra::{Matrix3, Vector3};
use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Orientation frame of a rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RotMatRepr", into = "RotMatRepr")]
pub struct RotMat {
    mat: Matrix3<f32>,
}

impl RotMat {
    /// World-aligned frame: forward = +X, right = +Y, up = +Z.
    pub const IDENTITY: Self = Self {
        mat: Matrix3::new(
            1.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, //
            0.0, 0.0, 1.0,
        ),
    };

    /// Build a frame from its three basis vectors (world space).
    #[inline]
    pub fn from_axes(forward: Vector3<f32>, right: Vector3<f32>, up: Vector3<f32>) -> Self {
        Self { mat: Matrix3::from_columns(&[forward, right, up]) }
    }

    /// Build a frame from Euler angles in radians (pitch, yaw, roll).
    ///
    /// Uses the field convention of the game: yaw around +Z, pitch around +Y,
    /// roll around the forward axis.
    pub fn from_euler(pitch: f32, yaw: f32, roll: f32) -> Self {
        let (sp, cp) = pitch.sin_cos();
        let (sy, cy) = yaw.sin_cos();
        let (sr, cr) = roll.sin_cos();

        let forward = Vector3::new(cp * cy, cp * sy, sp);
        let right = Vector3::new(cy * sp * sr - cr * sy, sy * sp * sr + cr * cy, -cp * sr);
        let up = Vector3::new(-cr * cy * sp - sr * sy, -cr * sy * sp + sr * cy, cp * cr);

        Self::from_axes(forward, right, up)
    }

    #[inline]
    pub fn forward(&self) -> Vector3<f32> {
        self.mat.column(0).into_owned()
    }

    #[inline]
    pub fn right(&self) -> Vector3<f32> {
        self.mat.column(1).into_owned()
    }

    #[inline]
    pub fn up(&self) -> Vector3<f32> {
        self.mat.column(2).into_owned()
    }

    /// Underlying matrix (columns = forward, right, up)
    #[inline]
    pub fn matrix(&self) -> &Matrix3<f32> {
        &self.mat
    }

    /// Re-express a world-space vector in this local frame.
    ///
    /// Returns `(forward·v, right·v, up·v)`.
    #[inline]
    pub fn dot(&self, v: &Vector3<f32>) -> Vector3<f32> {
        self.mat.tr_mul(v)
    }

    /// Scale every basis vector component-wise (used by team inversion).
    #[inline]
    pub fn scale_axes(&self, scale: &Vector3<f32>) -> Self {
        Self::from_axes(
            self.forward().component_mul(scale),
            self.right().component_mul(scale),
            self.up().component_mul(scale),
        )
    }

    /// Largest deviation of `Mᵀ·M` from identity.
    pub fn orthonormal_error(&self) -> f32 {
        let gram = self.mat.tr_mul(&self.mat) - Matrix3::identity();
        gram.iter().fold(0.0f32, |acc, v| acc.max(v.abs()))
    }

    pub fn is_finite(&self) -> bool {
        self.mat.iter().all(|v| v.is_finite())
    }
}

impl Default for RotMat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// =============================================================================
// Serialized form
// =============================================================================

/// Named-axes form used on the wire (`{ "forward": [..], "right": [..], "up": [..] }`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub struct RotMatRepr {
    pub forward: [f32; 3],
    pub right: [f32; 3],
    pub up: [f32; 3],
}

impl From<RotMatRepr> for RotMat {
    fn from(r: RotMatRepr) -> Self {
        Self::from_axes(r.forward.into(), r.right.into(), r.up.into())
    }
}

impl From<RotMat> for RotMatRepr {
    fn from(m: RotMat) -> Self {
        Self { forward: m.forward().into(), right: m.right().into(), up: m.up().into() }
    }
}

impl JsonSchema for RotMat {
    fn schema_name() -> String {
        "RotMat".to_owned()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        RotMatRepr::json_schema(gen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_axes() {
        let m = RotMat::IDENTITY;
        assert_eq!(m.forward(), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(m.right(), Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(m.up(), Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_dot_projects_onto_axes() {
        // Facing +Y: forward = +Y, right = -X, up = +Z
        let m = RotMat::from_axes(
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        );
        let local = m.dot(&Vector3::new(0.0, 10.0, 0.0));
        assert!((local.x - 10.0).abs() < 1e-6); // straight ahead
        assert!(local.y.abs() < 1e-6);
        assert!(local.z.abs() < 1e-6);
    }

    #[test]
    fn test_from_euler_is_orthonormal() {
        let m = RotMat::from_euler(0.3, -1.2, 2.1);
        assert!(m.orthonormal_error() < 1e-5);

        let zero = RotMat::from_euler(0.0, 0.0, 0.0);
        assert!((zero.forward() - Vector3::x()).norm() < 1e-6);
        assert!((zero.up() - Vector3::z()).norm() < 1e-6);
    }

    #[test]
    fn test_serde_named_axes() {
        let m = RotMat::from_euler(0.0, std::f32::consts::FRAC_PI_2, 0.0);
        let json = serde_json::to_value(m).unwrap();
        assert!(json.get("forward").is_some());
        assert!(json.get("up").is_some());

        let back: RotMat = serde_json::from_value(json).unwrap();
        assert!((back.forward() - m.forward()).norm() < 1e-6);
    }
}
