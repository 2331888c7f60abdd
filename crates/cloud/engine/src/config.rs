//! Engine configuration.
//!
//! Plain serde struct with defaults; loadable from TOML.

use std::path::Path;

use cloudeval_types::{CloudError, CloudResult};
use serde::{Deserialize, Serialize};

/// Default number of drops when the caller does not specify one.
pub const DEFAULT_DROP_COUNT: usize = 1000;

/// Drop count at which sampling switches to the parallel generator.
pub const DEFAULT_PARALLEL_DROP_THRESHOLD: usize = 50_000;

/// Column count at which synthesis estimates columns in parallel.
pub const DEFAULT_PARALLEL_COLUMN_THRESHOLD: usize = 64;

/// How to treat a weight vector shorter than the matrix's column count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightLengthPolicy {
    /// Missing weights become 0 and a warning is logged.
    #[default]
    ZeroFill,
    /// Missing weights are a `ShapeMismatch` error.
    Strict,
}

/// Configuration for the cloud engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Drops generated when no count is given. Default: 1000.
    pub default_drop_count: usize,
    /// Weight-length handling during synthesis.
    pub weight_policy: WeightLengthPolicy,
    /// Sampling at or above this many drops runs in parallel.
    pub parallel_drop_threshold: usize,
    /// Synthesis over at least this many columns runs in parallel.
    pub parallel_column_threshold: usize,
    /// Fixed seed for reproducible sampling. `None` uses OS entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_drop_count: DEFAULT_DROP_COUNT,
            weight_policy: WeightLengthPolicy::default(),
            parallel_drop_threshold: DEFAULT_PARALLEL_DROP_THRESHOLD,
            parallel_column_threshold: DEFAULT_PARALLEL_COLUMN_THRESHOLD,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> CloudResult<Self> {
        let config: Self = toml::from_str(text)
            .map_err(|e| CloudError::Config(format!("invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> CloudResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| CloudError::Config(format!("reading {}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> CloudResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CloudError::Config(format!("serialization failed: {}", e)))
    }

    pub fn validate(&self) -> CloudResult<()> {
        if self.default_drop_count == 0 {
            return Err(CloudError::Config(
                "default_drop_count must be at least 1".into(),
            ));
        }
        if self.parallel_drop_threshold == 0 || self.parallel_column_threshold == 0 {
            return Err(CloudError::Config(
                "parallel thresholds must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_weight_policy(mut self, policy: WeightLengthPolicy) -> Self {
        self.weight_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.default_drop_count, 1000);
        assert_eq!(cfg.weight_policy, WeightLengthPolicy::ZeroFill);
        assert_eq!(cfg.parallel_drop_threshold, 50_000);
        assert_eq!(cfg.parallel_column_threshold, 64);
        assert!(cfg.seed.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg = EngineConfig::from_toml_str(
            r#"
            weight_policy = "strict"
            seed = 42
            "#,
        )
        .unwrap();
        assert_eq!(cfg.weight_policy, WeightLengthPolicy::Strict);
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.default_drop_count, DEFAULT_DROP_COUNT);
    }

    #[test]
    fn toml_roundtrip() {
        let cfg = EngineConfig::default()
            .with_seed(7)
            .with_weight_policy(WeightLengthPolicy::Strict);
        let text = cfg.to_toml_string().unwrap();
        assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), cfg);
    }

    #[test]
    fn invalid_values_rejected() {
        let err = EngineConfig::from_toml_str("default_drop_count = 0").unwrap_err();
        assert!(matches!(err, CloudError::Config(_)));
        assert!(EngineConfig::from_toml_str("parallel_drop_threshold = 0").is_err());
        assert!(EngineConfig::from_toml_str("weight_policy = \"lenient\"").is_err());
    }

    #[test]
    fn load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "cloudeval_config_{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "default_drop_count = 2500\n").unwrap();
        let cfg = EngineConfig::load(&path).unwrap();
        assert_eq!(cfg.default_drop_count, 2500);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(
            EngineConfig::load("/nonexistent/cloudeval.toml"),
            Err(CloudError::Config(_))
        ));
    }
}
