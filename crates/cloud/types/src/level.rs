//! Five-level ordinal evaluation scale.
//!
//! Maps a comprehensive expectation on the 0–100 scale onto a linguistic
//! grade. Boundaries are half-open: `[0,25) [25,50) [50,75) [75,90) [90,∞)`.

use serde::{Deserialize, Serialize};

use crate::model::CloudModel;

/// Lower bound of [`EvaluationLevel::Poor`].
pub const POOR_LOWER_BOUND: f64 = 25.0;
/// Lower bound of [`EvaluationLevel::Moderate`].
pub const MODERATE_LOWER_BOUND: f64 = 50.0;
/// Lower bound of [`EvaluationLevel::Good`].
pub const GOOD_LOWER_BOUND: f64 = 75.0;
/// Lower bound of [`EvaluationLevel::Excellent`].
pub const EXCELLENT_LOWER_BOUND: f64 = 90.0;

/// Ordered evaluation grade, worst first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EvaluationLevel {
    Inferior,
    Poor,
    Moderate,
    Good,
    Excellent,
}

impl EvaluationLevel {
    /// All levels in ascending order.
    pub const ALL: [EvaluationLevel; 5] = [
        Self::Inferior,
        Self::Poor,
        Self::Moderate,
        Self::Good,
        Self::Excellent,
    ];

    /// Grade an expectation value.
    ///
    /// Values below 0 fall into `Inferior`; there is no upper cap. NaN has
    /// no position on the scale and also grades as `Inferior`.
    pub fn classify(ex: f64) -> Self {
        if ex.is_nan() || ex < POOR_LOWER_BOUND {
            Self::Inferior
        } else if ex < MODERATE_LOWER_BOUND {
            Self::Poor
        } else if ex < GOOD_LOWER_BOUND {
            Self::Moderate
        } else if ex < EXCELLENT_LOWER_BOUND {
            Self::Good
        } else {
            Self::Excellent
        }
    }

    /// Half-open score range `[lower, upper)` covered by this level.
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Inferior => (0.0, POOR_LOWER_BOUND),
            Self::Poor => (POOR_LOWER_BOUND, MODERATE_LOWER_BOUND),
            Self::Moderate => (MODERATE_LOWER_BOUND, GOOD_LOWER_BOUND),
            Self::Good => (GOOD_LOWER_BOUND, EXCELLENT_LOWER_BOUND),
            Self::Excellent => (EXCELLENT_LOWER_BOUND, f64::INFINITY),
        }
    }

    /// Reference ("standard") cloud conventionally drawn for this level.
    pub fn reference_cloud(&self) -> CloudModel {
        match self {
            Self::Inferior => CloudModel::from_trusted(12.5, 4.17, 0.5),
            Self::Poor => CloudModel::from_trusted(37.5, 4.17, 0.5),
            Self::Moderate => CloudModel::from_trusted(62.5, 4.17, 0.5),
            Self::Good => CloudModel::from_trusted(82.5, 2.5, 0.5),
            Self::Excellent => CloudModel::from_trusted(95.0, 1.67, 0.5),
        }
    }

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inferior => "inferior",
            Self::Poor => "poor",
            Self::Moderate => "moderate",
            Self::Good => "good",
            Self::Excellent => "excellent",
        }
    }
}

impl std::fmt::Display for EvaluationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inferior => write!(f, "Inferior"),
            Self::Poor => write!(f, "Poor"),
            Self::Moderate => write!(f, "Moderate"),
            Self::Good => write!(f, "Good"),
            Self::Excellent => write!(f, "Excellent"),
        }
    }
}

impl std::str::FromStr for EvaluationLevel {
    type Err = crate::error::CloudError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|l| l.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| crate::error::CloudError::invalid("level", format!("unknown level '{}'", s)))
    }
}
