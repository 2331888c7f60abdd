//! Cloud model value types.
//!
//! A cloud model describes a qualitative concept with three numbers:
//!
//! - **Ex** (expectation): the center of the concept's value range
//! - **En** (entropy): the breadth of the concept, i.e. its fuzziness
//! - **He** (hyper-entropy): the uncertainty of En itself
//!
//! Models are immutable once constructed. Drops are the sampled
//! realizations produced by forward generation.

use serde::{Deserialize, Serialize};

use crate::error::{CloudError, CloudResult};

// ── Cloud Model ─────────────────────────────────────────────────────────

/// A normal cloud model `(Ex, En, He)`.
///
/// Invariant: all three parameters are finite and `En >= 0`, `He >= 0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCloudModel", into = "RawCloudModel")]
pub struct CloudModel {
    ex: f64,
    en: f64,
    he: f64,
}

impl CloudModel {
    /// Create a model, validating the invariants.
    pub fn new(ex: f64, en: f64, he: f64) -> CloudResult<Self> {
        check_finite("Ex", ex)?;
        check_finite("En", en)?;
        check_finite("He", he)?;
        if en < 0.0 {
            return Err(CloudError::invalid(
                "En",
                format!("entropy must be non-negative, got {}", en),
            ));
        }
        if he < 0.0 {
            return Err(CloudError::invalid(
                "He",
                format!("hyper-entropy must be non-negative, got {}", he),
            ));
        }
        Ok(Self { ex, en, he })
    }

    /// Build a model from literal parameters known to satisfy the invariants.
    ///
    /// Intended for constant tables (reference clouds, presets). No checks
    /// are performed.
    pub const fn from_trusted(ex: f64, en: f64, he: f64) -> Self {
        Self { ex, en, he }
    }

    /// Expectation.
    pub fn ex(&self) -> f64 {
        self.ex
    }

    /// Entropy.
    pub fn en(&self) -> f64 {
        self.en
    }

    /// Hyper-entropy.
    pub fn he(&self) -> f64 {
        self.he
    }

    /// The three parameters as a tuple `(Ex, En, He)`.
    pub fn params(&self) -> (f64, f64, f64) {
        (self.ex, self.en, self.he)
    }

    /// Whether the model has no dispersion at all (`En == 0`).
    ///
    /// Degenerate models come out of reverse estimation on constant
    /// samples. They cannot be fed to forward generation.
    pub fn is_degenerate(&self) -> bool {
        self.en == 0.0
    }
}

impl std::fmt::Display for CloudModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Ex={:.4}, En={:.4}, He={:.4}",
            self.ex, self.en, self.he
        )
    }
}

fn check_finite(name: &str, value: f64) -> CloudResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CloudError::invalid(
            name,
            format!("must be finite, got {}", value),
        ))
    }
}

/// Wire form of [`CloudModel`]; deserialization goes through validation.
#[derive(Serialize, Deserialize)]
struct RawCloudModel {
    #[serde(rename = "Ex")]
    ex: f64,
    #[serde(rename = "En")]
    en: f64,
    #[serde(rename = "He")]
    he: f64,
}

impl TryFrom<RawCloudModel> for CloudModel {
    type Error = CloudError;

    fn try_from(raw: RawCloudModel) -> CloudResult<Self> {
        CloudModel::new(raw.ex, raw.en, raw.he)
    }
}

impl From<CloudModel> for RawCloudModel {
    fn from(m: CloudModel) -> Self {
        Self {
            ex: m.ex,
            en: m.en,
            he: m.he,
        }
    }
}

// ── Cloud Drop ──────────────────────────────────────────────────────────

/// One sampled point of a cloud together with its membership degree.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CloudDrop {
    /// Sampled value.
    pub value: f64,
    /// Membership degree in `[0, 1]`.
    pub membership: f64,
}

// ── Indicator Cloud ─────────────────────────────────────────────────────

/// The cloud estimated from one indicator column of a score matrix.
///
/// `weight` is the caller's raw weight. Normalization only happens inside
/// aggregation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndicatorCloud {
    /// 0-based column index in the source matrix.
    pub index: usize,
    /// Estimated model for the column.
    pub model: CloudModel,
    /// Pre-normalization weight.
    pub weight: f64,
}

impl IndicatorCloud {
    pub fn new(index: usize, model: CloudModel, weight: f64) -> Self {
        Self {
            index,
            model,
            weight,
        }
    }

    /// Display label, 1-based (`"indicator-1"` for column 0).
    pub fn label(&self) -> String {
        format!("indicator-{}", self.index + 1)
    }
}

// ── Comprehensive Cloud ─────────────────────────────────────────────────

/// The weighted aggregate of all indicator clouds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComprehensiveCloud(CloudModel);

impl ComprehensiveCloud {
    pub fn new(model: CloudModel) -> Self {
        Self(model)
    }

    /// The aggregate model.
    pub fn model(&self) -> &CloudModel {
        &self.0
    }

    pub fn into_model(self) -> CloudModel {
        self.0
    }
}

impl std::ops::Deref for ComprehensiveCloud {
    type Target = CloudModel;

    fn deref(&self) -> &CloudModel {
        &self.0
    }
}

impl std::fmt::Display for ComprehensiveCloud {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "comprehensive({})", self.0)
    }
}
