//! Physics and field constants for the standard soccar arena
//!
//! All distances in unreal units (uu), speeds in uu/s.

// ============================================================
// Field geometry
// ============================================================
pub mod field {
    /// Distance from the center line to either side wall
    pub const SIDE_WALL_X: f32 = 4096.0;

    /// Distance from the center line to either back wall (goal line)
    pub const BACK_WALL_Y: f32 = 5120.0;

    /// Ceiling height
    pub const CEILING_Z: f32 = 2044.0;

    /// Goal mouth height
    pub const GOAL_HEIGHT: f32 = 642.775;

    /// Half of the goal mouth width (3572 / 2)
    pub const GOAL_HALF_WIDTH: f32 = 1786.0;
}

// ============================================================
// Car limits
// ============================================================
pub mod car {
    /// Maximum car speed
    pub const MAX_SPEED: f32 = 2300.0;

    /// Speed at which a car counts as supersonic
    pub const SUPERSONIC_THRESHOLD: f32 = 2200.0;

    /// Boost tank capacity
    pub const MAX_BOOST: f32 = 100.0;
}

// ============================================================
// Observation normalisation (defaults for ObsConfig)
// ============================================================
pub mod coef {
    /// Position scale: half the field length maps to ~1
    pub const POS_COEF: f32 = 1.0 / 5000.0;

    /// Velocity scale: car max speed maps to 1
    pub const VEL_COEF: f32 = 1.0 / 2300.0;

    /// Angular velocity scale
    pub const ANG_VEL_COEF: f32 = 1.0 / 3.0;
}

// ============================================================
// Kickoff detection (extended observation)
// ============================================================
pub mod kickoff {
    /// Ball must be within this distance of center on X and Y
    pub const CENTER_TOLERANCE: f32 = 20.0;

    /// Ball speed below which the ball counts as resting
    pub const MAX_BALL_SPEED: f32 = 50.0;
}

// ============================================================
// Boost pads
// ============================================================
pub mod boost_pads {
    /// Number of pads on the standard field
    pub const COUNT: usize = 34;

    /// Pad locations (x, y, z) from the blue side's point of view, ordered by Y then X.
    ///
    /// Reversing the table mirrors it: `LOCATIONS[COUNT - 1 - i]` is `LOCATIONS[i]`
    /// with X and Y negated.
    pub const LOCATIONS: [[f32; 3]; COUNT] = [
        [0.0, -4240.0, 70.0],
        [-1792.0, -4184.0, 70.0],
        [1792.0, -4184.0, 70.0],
        [-3072.0, -4096.0, 73.0],
        [3072.0, -4096.0, 73.0],
        [-940.0, -3308.0, 70.0],
        [940.0, -3308.0, 70.0],
        [0.0, -2816.0, 70.0],
        [-3584.0, -2484.0, 70.0],
        [3584.0, -2484.0, 70.0],
        [-1788.0, -2300.0, 70.0],
        [1788.0, -2300.0, 70.0],
        [-2048.0, -1036.0, 70.0],
        [0.0, -1024.0, 70.0],
        [2048.0, -1036.0, 70.0],
        [-3584.0, 0.0, 73.0],
        [-1024.0, 0.0, 70.0],
        [1024.0, 0.0, 70.0],
        [3584.0, 0.0, 73.0],
        [-2048.0, 1036.0, 70.0],
        [0.0, 1024.0, 70.0],
        [2048.0, 1036.0, 70.0],
        [-1788.0, 2300.0, 70.0],
        [1788.0, 2300.0, 70.0],
        [-3584.0, 2484.0, 70.0],
        [3584.0, 2484.0, 70.0],
        [0.0, 2816.0, 70.0],
        [-940.0, 3310.0, 70.0],
        [940.0, 3308.0, 70.0],
        [-3072.0, 4096.0, 73.0],
        [3072.0, 4096.0, 73.0],
        [-1792.0, 4184.0, 70.0],
        [1792.0, 4184.0, 70.0],
        [0.0, 4240.0, 70.0],
    ];
}

#[cfg(test)]
mod tests {
    use super::boost_pads::{COUNT, LOCATIONS};

    #[test]
    fn test_pad_table_is_mirror_symmetric() {
        for i in 0..COUNT {
            let a = LOCATIONS[i];
            let b = LOCATIONS[COUNT - 1 - i];
            assert!((a[0] + b[0]).abs() < 1.0, "pad {} x", i);
            assert!((a[1] + b[1]).abs() < 3.0, "pad {} y", i);
            assert_eq!(a[2], b[2]);
        }
    }

    #[test]
    fn test_six_big_pads() {
        // Big pads sit at z = 73
        assert_eq!(LOCATIONS.iter().filter(|loc| loc[2] > 72.0).count(), 6);
    }
}
