use thiserror::Error;

#[derive(Error, Debug)]
pub enum ObsError {
    #[error("Non-finite value in {field}")]
    NonFinite { field: String },

    #[error("Rotation frame of {field} is not orthonormal (error {error:.2e})")]
    RotationNotOrthonormal { field: String, error: f32 },

    #[error("Boost pad tables differ in length: {pads} flags, {timers} timers")]
    BoostTableMismatch { pads: usize, timers: usize },

    #[error("Boost pad table has {found} entries, expected {expected}")]
    BoostTableSize { found: usize, expected: usize },

    #[error("Negative boost pad timer at index {index}: {timer}")]
    NegativePadTimer { index: usize, timer: f32 },

    #[error("Boost out of range for car {car_id}: {boost}")]
    BoostOutOfRange { car_id: u32, boost: f32 },

    #[error("Duplicate player id: {car_id}")]
    DuplicatePlayerId { car_id: u32 },

    #[error("Player not found: {car_id}")]
    PlayerNotFound { car_id: u32 },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ObsError {
    /// Contract violations come from the snapshot producer; the rest from files/config.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            ObsError::NonFinite { .. }
                | ObsError::RotationNotOrthonormal { .. }
                | ObsError::BoostTableMismatch { .. }
                | ObsError::BoostTableSize { .. }
                | ObsError::NegativePadTimer { .. }
                | ObsError::BoostOutOfRange { .. }
                | ObsError::DuplicatePlayerId { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ObsError>;
