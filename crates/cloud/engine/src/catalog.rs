//! Reference ("standard") clouds and variation presets.
//!
//! The standard catalog holds one named cloud per evaluation level, drawn
//! next to a comprehensive cloud for comparison. Callers may replace it with
//! their own table; the engine only ever reads individual entries.

use cloudeval_types::{CloudError, CloudModel, CloudResult, EvaluationLevel};
use serde::{Deserialize, Serialize};

/// Drop count used for each default standard cloud.
pub const DEFAULT_STANDARD_DROP_COUNT: usize = 1200;

/// One entry of the standard catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandardCloud {
    pub name: String,
    /// Evaluation level the cloud stands for, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<EvaluationLevel>,
    pub model: CloudModel,
    pub drop_count: usize,
}

impl StandardCloud {
    pub fn new(name: impl Into<String>, model: CloudModel, drop_count: usize) -> Self {
        Self {
            name: name.into(),
            level: None,
            model,
            drop_count,
        }
    }

    fn for_level(level: EvaluationLevel) -> Self {
        Self {
            name: level.as_str().to_string(),
            level: Some(level),
            model: level.reference_cloud(),
            drop_count: DEFAULT_STANDARD_DROP_COUNT,
        }
    }
}

/// Ordered table of standard clouds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandardCatalog {
    entries: Vec<StandardCloud>,
}

impl StandardCatalog {
    /// Build a catalog. Names must be unique (case-insensitive).
    pub fn new(entries: Vec<StandardCloud>) -> CloudResult<Self> {
        for (i, a) in entries.iter().enumerate() {
            if entries[..i]
                .iter()
                .any(|b| b.name.eq_ignore_ascii_case(&a.name))
            {
                return Err(CloudError::invalid(
                    "catalog",
                    format!("duplicate standard cloud name '{}'", a.name),
                ));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[StandardCloud] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn by_name(&self, name: &str) -> Option<&StandardCloud> {
        self.entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    pub fn by_level(&self, level: EvaluationLevel) -> Option<&StandardCloud> {
        self.entries.iter().find(|e| e.level == Some(level))
    }

    pub fn from_json_str(text: &str) -> CloudResult<Self> {
        let parsed: Self = serde_json::from_str(text)
            .map_err(|e| CloudError::Config(format!("invalid catalog JSON: {}", e)))?;
        Self::new(parsed.entries)
    }

    pub fn to_json_string(&self) -> CloudResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CloudError::Config(format!("serialization failed: {}", e)))
    }
}

impl Default for StandardCatalog {
    /// One entry per evaluation level, worst first.
    fn default() -> Self {
        Self {
            entries: EvaluationLevel::ALL
                .iter()
                .map(|&l| StandardCloud::for_level(l))
                .collect(),
        }
    }
}

/// Ready-made clouds centered on 50 with increasing dispersion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariationPreset {
    Low,
    Medium,
    High,
    Extreme,
}

impl VariationPreset {
    pub const ALL: [VariationPreset; 4] = [Self::Low, Self::Medium, Self::High, Self::Extreme];

    pub fn model(&self) -> CloudModel {
        match self {
            Self::Low => CloudModel::from_trusted(50.0, 5.0, 0.1),
            Self::Medium => CloudModel::from_trusted(50.0, 8.0, 0.5),
            Self::High => CloudModel::from_trusted(50.0, 12.0, 1.0),
            Self::Extreme => CloudModel::from_trusted(50.0, 15.0, 2.0),
        }
    }
}
