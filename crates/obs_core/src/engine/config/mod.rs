//! # Observation Configuration Module
//!
//! Every tunable of the observation builders lives here, so alternate
//! scalings can be tried without recompiling.
//!
//! ## Usage
//! ```rust
//! use obs_core::engine::config::ObsConfig;
//!
//! let config = ObsConfig::default();
//! let duel = ObsConfig::duel();
//! assert_eq!(duel.padding.max_opponents, 1);
//! ```

mod obs_config;

pub use obs_config::{ObsConfig, PaddingConfig};

use std::path::Path;

use crate::error::{ObsError, Result};

impl ObsConfig {
    /// 3v3 slots (same as default)
    pub fn standard_3v3() -> Self {
        Self::default()
    }

    /// 1v1: no teammates, one opponent
    pub fn duel() -> Self {
        Self::with_padding(0, 1)
    }

    /// 2v2: one teammate, two opponents
    pub fn doubles() -> Self {
        Self::with_padding(1, 2)
    }

    pub fn with_padding(max_teammates: usize, max_opponents: usize) -> Self {
        Self { padding: PaddingConfig { max_teammates, max_opponents }, ..Self::default() }
    }

    /// Coefficients must be finite and positive, pad table non-empty.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("pos_coef", self.pos_coef),
            ("vel_coef", self.vel_coef),
            ("ang_vel_coef", self.ang_vel_coef),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ObsError::InvalidConfig(format!("{} must be positive, got {}", name, value)));
            }
        }
        if self.boost_pad_count == 0 {
            return Err(ObsError::InvalidConfig("boost_pad_count must be non-zero".to_owned()));
        }
        Ok(())
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from file; `.yaml`/`.yml` are read as YAML, anything else as JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            _ => Self::from_json_str(&text),
        }
    }
}
