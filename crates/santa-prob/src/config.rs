use std::fs;
use std::path::Path;

use santa_core::{ErrorInfo, SantaError, TrialCount};
use serde::{Deserialize, Serialize};

use crate::enumerate::MAX_EXACT_GROUP;
use crate::procedure::Procedure;

/// YAML-configurable parameters governing matrix computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Groups smaller than this are enumerated exactly; the rest are simulated.
    #[serde(default = "default_threshold")]
    pub threshold: usize,
    /// Monte Carlo trials per computation.
    #[serde(default = "default_trials")]
    pub trials: u64,
    /// Draw procedure used by both paths.
    #[serde(default)]
    pub procedure: Procedure,
    /// Master seed for the Monte Carlo path. Entropy is used when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Allowed deviation of an exact row sum from one.
    #[serde(default = "default_drift_tolerance")]
    pub drift_tolerance: f64,
}

fn default_threshold() -> usize {
    10
}

fn default_trials() -> u64 {
    TrialCount::DEFAULT
}

fn default_drift_tolerance() -> f64 {
    1e-6
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            trials: default_trials(),
            procedure: Procedure::default(),
            seed: None,
            drift_tolerance: default_drift_tolerance(),
        }
    }
}

impl EngineConfig {
    /// Parses a YAML document and validates it.
    pub fn from_yaml_str(text: &str) -> Result<Self, SantaError> {
        let config: Self = serde_yaml::from_str(text).map_err(|err| {
            SantaError::Config(ErrorInfo::new("config_parse", err.to_string()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, SantaError> {
        let text = fs::read_to_string(path).map_err(|err| {
            SantaError::Config(
                ErrorInfo::new("config_read", err.to_string())
                    .with_context("path", path.display()),
            )
        })?;
        Self::from_yaml_str(&text)
    }

    /// Checks ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), SantaError> {
        if self.threshold < 2 || self.threshold > MAX_EXACT_GROUP + 1 {
            return Err(SantaError::Config(
                ErrorInfo::new("threshold", "exact threshold out of range")
                    .with_context("threshold", self.threshold)
                    .with_context("max", MAX_EXACT_GROUP + 1),
            ));
        }
        if self.trials == 0 {
            return Err(SantaError::Config(ErrorInfo::new(
                "trial_count",
                "trial count must be positive",
            )));
        }
        if !(self.drift_tolerance.is_finite() && self.drift_tolerance > 0.0) {
            return Err(SantaError::Config(
                ErrorInfo::new("drift_tolerance", "drift tolerance must be positive")
                    .with_context("drift_tolerance", self.drift_tolerance),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = EngineConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.threshold, 10);
        assert_eq!(config.trials, 100_000);
    }

    #[test]
    fn partial_document_overrides() {
        let config =
            EngineConfig::from_yaml_str("threshold: 6\nprocedure: swap-repair\nseed: 42\n")
                .unwrap();
        assert_eq!(config.threshold, 6);
        assert_eq!(config.procedure, Procedure::SwapRepair);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        for text in ["threshold: 1", "threshold: 40", "trials: 0", "drift_tolerance: -1.0"] {
            let err = EngineConfig::from_yaml_str(text).unwrap_err();
            assert!(matches!(err, SantaError::Config(_)), "{text}");
        }
        let widest = format!("threshold: {}", MAX_EXACT_GROUP + 1);
        assert_eq!(EngineConfig::from_yaml_str(&widest).unwrap().threshold, 12);
        let past = format!("threshold: {}", MAX_EXACT_GROUP + 2);
        assert!(EngineConfig::from_yaml_str(&past).is_err());
        let err = EngineConfig::from_yaml_str("procedure: shuffle").unwrap_err();
        assert_eq!(err.info().code, "config_parse");
    }
}
