//! Shared configuration types.
//!
//! # JSON shape
//!
//! ```json
//! { "damping": 0.85, "tolerance": 1e-9, "max_iterations": 100 }
//! ```
//!
//! Omitted fields take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{RankError, Result};

/// Parameters of the random-surfer model and the iteration limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    /// Probability of following an outgoing link (`d`).
    pub damping: f64,
    /// L1 change between iterations below which the iteration stops.
    pub tolerance: f64,
    /// Iteration cap. Hitting it is not an error.
    pub max_iterations: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1e-9,
            max_iterations: 100,
        }
    }
}

impl RankConfig {
    /// Teleport probability `m = 1 - d`.
    pub fn teleport(&self) -> f64 {
        1.0 - self.damping
    }

    pub fn validate(&self) -> Result<()> {
        if !self.damping.is_finite() || !(0.0..=1.0).contains(&self.damping) {
            return Err(RankError::InvalidDamping(self.damping));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(RankError::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| RankError::from_io(e, path))?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = RankConfig::default();
        assert_eq!(cfg.damping, 0.85);
        assert_eq!(cfg.tolerance, 1e-9);
        assert_eq!(cfg.max_iterations, 100);
        assert!((cfg.damping + cfg.teleport() - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg = RankConfig::from_json_str(r#"{ "damping": 0.5 }"#).unwrap();
        assert_eq!(cfg.damping, 0.5);
        assert_eq!(cfg.max_iterations, 100);
    }

    #[test]
    fn test_rejects_damping_out_of_range() {
        let err = RankConfig::from_json_str(r#"{ "damping": 1.5 }"#).unwrap_err();
        assert!(matches!(err, RankError::InvalidDamping(d) if d == 1.5));
    }

    #[test]
    fn test_rejects_negative_tolerance() {
        let cfg = RankConfig {
            tolerance: -1.0,
            ..RankConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(RankError::InvalidTolerance(_))));
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = RankConfig::from_json_str("{ damping: }").unwrap_err();
        assert!(matches!(err, RankError::Config(_)));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rank.json");
        std::fs::write(&path, r#"{ "tolerance": 1e-6, "max_iterations": 50 }"#).unwrap();

        let cfg = RankConfig::from_path(&path).unwrap();
        assert_eq!(cfg.tolerance, 1e-6);
        assert_eq!(cfg.max_iterations, 50);
    }
}
