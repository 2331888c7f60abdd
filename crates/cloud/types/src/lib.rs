#![deny(unsafe_code)]
//! # cloudeval-types
//!
//! Data model for cloud-model based comprehensive evaluation.
//!
//! A cloud model turns a qualitative judgement ("good", "roughly 80") into a
//! quantitative object with three parameters, and back again:
//!
//! - [`CloudModel`]: `(Ex, En, He)` expectation, entropy, hyper-entropy
//! - [`CloudDrop`]: one sampled value with its membership degree
//! - [`ScoreMatrix`]: experts × indicators raw scores
//! - [`WeightVector`]: per-indicator weights, normalized only at point of use
//! - [`IndicatorCloud`]: a column's estimated cloud paired with its weight
//! - [`ComprehensiveCloud`]: the weighted aggregate over all indicators
//! - [`EvaluationLevel`]: five-grade ordinal scale over the aggregate Ex
//!
//! All errors are reported through [`CloudError`].

pub mod error;
pub mod level;
pub mod matrix;
pub mod model;

pub use error::{CloudError, CloudResult};
pub use level::{
    EvaluationLevel, EXCELLENT_LOWER_BOUND, GOOD_LOWER_BOUND, MODERATE_LOWER_BOUND,
    POOR_LOWER_BOUND,
};
pub use matrix::{ScoreMatrix, WeightVector};
pub use model::{CloudDrop, CloudModel, ComprehensiveCloud, IndicatorCloud};
