//! Indicator cloud synthesis.
//!
//! Runs the reverse estimator over every column of a score matrix and pairs
//! each resulting model with the caller's weight for that column.

use cloudeval_types::{CloudError, CloudResult, IndicatorCloud, ScoreMatrix, WeightVector};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::{WeightLengthPolicy, DEFAULT_PARALLEL_COLUMN_THRESHOLD};
use crate::reverse;

/// Builds one [`IndicatorCloud`] per score-matrix column.
#[derive(Clone, Debug)]
pub struct IndicatorSynthesizer {
    policy: WeightLengthPolicy,
    parallel_column_threshold: usize,
}

impl IndicatorSynthesizer {
    pub fn new(policy: WeightLengthPolicy) -> Self {
        Self {
            policy,
            parallel_column_threshold: DEFAULT_PARALLEL_COLUMN_THRESHOLD,
        }
    }

    /// Column count at which estimation moves to the rayon pool.
    pub fn with_parallel_threshold(mut self, columns: usize) -> Self {
        self.parallel_column_threshold = columns.max(1);
        self
    }

    pub fn policy(&self) -> WeightLengthPolicy {
        self.policy
    }

    /// Estimate every column and attach its weight.
    ///
    /// Output is in column order, one entry per column. Weights beyond the
    /// column count are ignored. A short weight vector is zero-filled or
    /// rejected depending on the policy.
    pub fn synthesize(
        &self,
        matrix: &ScoreMatrix,
        weights: &WeightVector,
    ) -> CloudResult<Vec<IndicatorCloud>> {
        let cols = matrix.cols();
        if weights.len() < cols {
            match self.policy {
                WeightLengthPolicy::Strict => {
                    return Err(CloudError::shape(format!(
                        "{} weights supplied for {} indicator columns",
                        weights.len(),
                        cols
                    )));
                }
                WeightLengthPolicy::ZeroFill => {
                    warn!(
                        weights = weights.len(),
                        columns = cols,
                        "weight vector shorter than column count; missing weights set to 0"
                    );
                }
            }
        }

        let estimate_column = |index: usize| -> CloudResult<IndicatorCloud> {
            let column = matrix
                .column(index)
                .ok_or_else(|| CloudError::shape(format!("column {} out of range", index)))?;
            let model = reverse::estimate(&column).map_err(|e| e.in_column(index))?;
            Ok(IndicatorCloud::new(
                index,
                model,
                weights.get(index).unwrap_or(0.0),
            ))
        };

        // Either path reports the lowest failing column.
        let clouds: Vec<IndicatorCloud> = if cols >= self.parallel_column_threshold {
            let results: Vec<CloudResult<IndicatorCloud>> =
                (0..cols).into_par_iter().map(estimate_column).collect();
            results.into_iter().collect::<CloudResult<_>>()?
        } else {
            (0..cols).map(estimate_column).collect::<CloudResult<_>>()?
        };

        debug!(
            experts = matrix.rows(),
            indicators = cols,
            "synthesized indicator clouds"
        );
        Ok(clouds)
    }
}

impl Default for IndicatorSynthesizer {
    fn default() -> Self {
        Self::new(WeightLengthPolicy::default())
    }
}
