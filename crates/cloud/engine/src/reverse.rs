//! Reverse cloud estimator: samples → `(Ex, En, He)`.
//!
//! Method-of-moments backward transform without certainty degrees:
//!
//! ```text
//!   Ex = mean(x)
//!   S1 = mean(|x - Ex|)                first absolute central moment
//!   S² = Σ(x - Ex)² / (n - 1)           unbiased sample variance
//!   En = sqrt(π/2) · S1
//!   He = sqrt(|S² - En²|)
//! ```
//!
//! For small or skewed samples `S² - En²` can go negative. The absolute value
//! absorbs that; it is an approximation artifact of the moment identity, not
//! an input error. [`ReverseEstimate::radicand_clamped`] reports when it
//! happened.

use cloudeval_types::{CloudError, CloudModel, CloudResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Smallest sample the estimator accepts.
pub const MIN_SAMPLE_SIZE: usize = 2;

/// A reverse estimate together with its intermediate moments.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReverseEstimate {
    pub model: CloudModel,
    /// Number of samples used.
    pub sample_size: usize,
    /// First absolute central moment.
    pub s1: f64,
    /// Unbiased sample variance.
    pub variance: f64,
    /// `true` when `S² - En²` was negative and its magnitude was used.
    pub radicand_clamped: bool,
}

/// Estimate a cloud model from a sample.
pub fn estimate(samples: &[f64]) -> CloudResult<CloudModel> {
    estimate_detailed(samples).map(|e| e.model)
}

/// Estimate a cloud model and return the intermediate moments too.
pub fn estimate_detailed(samples: &[f64]) -> CloudResult<ReverseEstimate> {
    let n = samples.len();
    if n < MIN_SAMPLE_SIZE {
        return Err(CloudError::InsufficientSample {
            required: MIN_SAMPLE_SIZE,
            actual: n,
            column: None,
        });
    }
    if let Some(pos) = samples.iter().position(|v| !v.is_finite()) {
        return Err(CloudError::invalid(
            "samples",
            format!("value at position {} is not finite: {}", pos, samples[pos]),
        ));
    }

    let nf = n as f64;
    let ex = samples.iter().sum::<f64>() / nf;
    let s1 = samples.iter().map(|x| (x - ex).abs()).sum::<f64>() / nf;
    let variance = samples.iter().map(|x| (x - ex).powi(2)).sum::<f64>() / (nf - 1.0);

    let en = (std::f64::consts::PI / 2.0).sqrt() * s1;
    if !ex.is_finite() || !variance.is_finite() || !en.is_finite() {
        return Err(CloudError::invalid(
            "samples",
            format!(
                "moments overflow f64 (mean {}, variance {}); sample magnitudes are too large",
                ex, variance
            ),
        ));
    }
    let radicand = variance - en * en;
    let radicand_clamped = radicand < 0.0;
    if radicand_clamped {
        debug!(
            sample_size = n,
            radicand, "negative He radicand absorbed by absolute value"
        );
    }
    let he = radicand.abs().sqrt();

    Ok(ReverseEstimate {
        model: CloudModel::new(ex, en, he)?,
        sample_size: n,
        s1,
        variance,
        radicand_clamped,
    })
}
