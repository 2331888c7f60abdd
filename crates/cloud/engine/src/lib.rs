#![deny(unsafe_code)]
//! # cloudeval-engine
//!
//! Cloud model transform engine: turns multi-expert scoring data into
//! quantitative clouds and back.
//!
//! ## Architecture
//!
//! ```text
//!   ScoreMatrix + WeightVector
//!           │
//!           ▼
//!   ┌──────────────────────┐   per column   ┌──────────────────┐
//!   │ IndicatorSynthesizer │ ─────────────► │ reverse::estimate│
//!   └──────────┬───────────┘                └──────────────────┘
//!              │ Vec<IndicatorCloud>
//!              ▼
//!   ┌──────────────────────┐
//!   │ aggregate()          │ ──► ComprehensiveCloud ──► EvaluationLevel
//!   └──────────────────────┘
//!              │
//!              ▼
//!   ┌──────────────────────┐
//!   │ forward::generate    │ ──► Vec<CloudDrop>  (any CloudModel)
//!   └──────────────────────┘
//! ```
//!
//! Every operation is a pure function of its inputs. Randomness enters only
//! through a [`NormalSource`] passed by the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use cloudeval_engine::{CloudEvaluator, EvaluationRequest};
//! use cloudeval_types::{EvaluationLevel, ScoreMatrix, WeightVector};
//!
//! let matrix = ScoreMatrix::from_rows(&[
//!     vec![80.0, 90.0],
//!     vec![84.0, 94.0],
//!     vec![78.0, 92.0],
//! ])
//! .unwrap();
//! let request = EvaluationRequest::new(matrix)
//!     .with_weights(WeightVector::new(vec![0.4, 0.6]).unwrap());
//!
//! let report = CloudEvaluator::default().evaluate(&request).unwrap();
//! assert_eq!(report.indicators.len(), 2);
//! assert_eq!(report.level, EvaluationLevel::Good);
//! ```

pub mod aggregate;
pub mod catalog;
pub mod config;
pub mod evaluator;
pub mod forward;
pub mod random;
pub mod reverse;
pub mod stats;
pub mod synthesis;

// ── Re-exports ──────────────────────────────────────────────────────────

pub use aggregate::aggregate;
pub use catalog::{StandardCatalog, StandardCloud, VariationPreset, DEFAULT_STANDARD_DROP_COUNT};
pub use config::{EngineConfig, WeightLengthPolicy, DEFAULT_DROP_COUNT};
pub use evaluator::{CloudEvaluator, EvaluationReport, EvaluationRequest};
pub use forward::{expectation_curve, generate, generate_parallel, membership};
pub use random::{NormalSource, RngNormalSource, ScriptedNormalSource, SeededNormalSource};
pub use reverse::{estimate, estimate_detailed, ReverseEstimate, MIN_SAMPLE_SIZE};
pub use stats::DropStatistics;
pub use synthesis::IndicatorSynthesizer;

pub use cloudeval_types::{
    CloudDrop, CloudError, CloudModel, CloudResult, ComprehensiveCloud, EvaluationLevel,
    IndicatorCloud, ScoreMatrix, WeightVector,
};
