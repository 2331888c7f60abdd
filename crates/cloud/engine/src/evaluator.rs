//! Request/response facade over the whole pipeline.
//!
//! ```text
//!   EvaluationRequest { matrix, weights? }
//!       │
//!       ▼
//!   IndicatorSynthesizer ──► Vec<IndicatorCloud>
//!       │
//!       ▼
//!   aggregate() ──► ComprehensiveCloud ──► EvaluationLevel
//! ```
//!
//! The evaluator holds configuration only. Every call is independent.

use cloudeval_types::{
    CloudDrop, CloudModel, CloudResult, ComprehensiveCloud, EvaluationLevel, IndicatorCloud,
    ScoreMatrix, WeightVector,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::aggregate;
use crate::catalog::StandardCloud;
use crate::config::EngineConfig;
use crate::forward;
use crate::random::SeededNormalSource;
use crate::synthesis::IndicatorSynthesizer;

/// Input to one evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub matrix: ScoreMatrix,
    /// Per-indicator weights. `None` means equal weights.
    #[serde(default)]
    pub weights: Option<WeightVector>,
}

impl EvaluationRequest {
    pub fn new(matrix: ScoreMatrix) -> Self {
        Self {
            matrix,
            weights: None,
        }
    }

    pub fn with_weights(mut self, weights: WeightVector) -> Self {
        self.weights = Some(weights);
        self
    }
}

/// Output of one evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub indicators: Vec<IndicatorCloud>,
    pub comprehensive: ComprehensiveCloud,
    pub level: EvaluationLevel,
}

/// Stateless evaluation service.
#[derive(Clone, Debug, Default)]
pub struct CloudEvaluator {
    config: EngineConfig,
}

impl CloudEvaluator {
    pub fn new(config: EngineConfig) -> CloudResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run synthesis, aggregation and classification.
    pub fn evaluate(&self, request: &EvaluationRequest) -> CloudResult<EvaluationReport> {
        let equal;
        let weights = match &request.weights {
            Some(w) => w,
            None => {
                equal = WeightVector::equal(request.matrix.cols());
                &equal
            }
        };

        let synthesizer = IndicatorSynthesizer::new(self.config.weight_policy)
            .with_parallel_threshold(self.config.parallel_column_threshold);
        let indicators = synthesizer.synthesize(&request.matrix, weights)?;
        let comprehensive = aggregate(&indicators)?;
        let level = EvaluationLevel::classify(comprehensive.ex());

        debug!(
            indicators = indicators.len(),
            ex = comprehensive.ex(),
            level = %level,
            "evaluation complete"
        );
        Ok(EvaluationReport {
            indicators,
            comprehensive,
            level,
        })
    }

    /// Generate drops for `model`; `None` uses the configured default count.
    ///
    /// Large counts run on the parallel generator. With a configured seed
    /// the result is reproducible.
    pub fn sample(&self, model: &CloudModel, count: Option<usize>) -> CloudResult<Vec<CloudDrop>> {
        let count = count.unwrap_or(self.config.default_drop_count);
        let seed = self.config.seed;

        if count >= self.config.parallel_drop_threshold {
            let seed = seed.unwrap_or_else(rand::random);
            return forward::generate_parallel(model, count, seed);
        }

        let mut source = match seed {
            Some(s) => SeededNormalSource::seeded(s),
            None => SeededNormalSource::from_entropy(),
        };
        forward::generate(model, count, &mut source)
    }

    /// Generate drops for a standard cloud using its own drop count.
    pub fn sample_standard(&self, standard: &StandardCloud) -> CloudResult<Vec<CloudDrop>> {
        self.sample(&standard.model, Some(standard.drop_count))
    }
}
