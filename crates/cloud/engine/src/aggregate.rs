//! Comprehensive cloud aggregation.
//!
//! Combines weighted indicator clouds into one cloud by second-order
//! moments:
//!
//! ```text
//!   w_i     = weight_i / Σ weight_j
//!   Ex_comp = Σ w_i · Ex_i
//!   En_comp = sqrt( Σ w_i · (En_i² + (Ex_i - Ex_comp)²) )
//!   He_comp = sqrt( Σ w_i · He_i² )
//! ```
//!
//! An indicator whose expectation sits far from the consensus adds entropy
//! to the aggregate even when its own `En_i` is small.

use cloudeval_types::{
    CloudError, CloudModel, CloudResult, ComprehensiveCloud, IndicatorCloud, WeightVector,
};
use tracing::debug;

/// Aggregate indicator clouds into a comprehensive cloud.
///
/// Fails with `InvalidParameter` on an empty input or a negative or
/// non-finite weight, and with `DegenerateAggregation` when the weights sum
/// to zero. Sums run in input order, so the result is deterministic.
pub fn aggregate(clouds: &[IndicatorCloud]) -> CloudResult<ComprehensiveCloud> {
    if clouds.is_empty() {
        return Err(CloudError::invalid(
            "clouds",
            "cannot aggregate an empty set of indicator clouds",
        ));
    }
    for c in clouds {
        if !c.weight.is_finite() || c.weight < 0.0 {
            return Err(CloudError::invalid(
                format!("weights[{}]", c.index),
                format!("weight must be finite and non-negative, got {}", c.weight),
            ));
        }
    }

    let weights = WeightVector::new(clouds.iter().map(|c| c.weight).collect())?;
    let total = weights.total();
    let normalized = weights.normalized()?;

    let ex = clouds
        .iter()
        .zip(&normalized)
        .map(|(c, w)| w * c.model.ex())
        .sum::<f64>();

    let en_sq = clouds
        .iter()
        .zip(&normalized)
        .map(|(c, w)| {
            let spread = c.model.ex() - ex;
            w * (c.model.en().powi(2) + spread * spread)
        })
        .sum::<f64>();

    let he_sq = clouds
        .iter()
        .zip(&normalized)
        .map(|(c, w)| w * c.model.he().powi(2))
        .sum::<f64>();

    let model = CloudModel::new(ex, en_sq.sqrt(), he_sq.sqrt())?;
    debug!(
        indicators = clouds.len(),
        total_weight = total,
        model = %model,
        "aggregated comprehensive cloud"
    );
    Ok(ComprehensiveCloud::new(model))
}
