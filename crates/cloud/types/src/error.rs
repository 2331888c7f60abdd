use thiserror::Error;

/// Errors from the cloud model engine.
///
/// Every variant is a caller input problem reported at the point of
/// detection. None of them is retried: the computations are deterministic,
/// so the same input always fails the same way.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CloudError {
    #[error("invalid parameter `{parameter}`: {detail}")]
    InvalidParameter { parameter: String, detail: String },

    #[error("insufficient sample{}: need at least {required} values, got {actual}", column_suffix(.column))]
    InsufficientSample {
        required: usize,
        actual: usize,
        column: Option<usize>,
    },

    #[error("shape mismatch: {detail}")]
    ShapeMismatch { detail: String },

    #[error("degenerate aggregation: total weight {total_weight} cannot be normalized")]
    DegenerateAggregation { total_weight: f64 },

    #[error("configuration error: {0}")]
    Config(String),
}

fn column_suffix(column: &Option<usize>) -> String {
    match column {
        Some(c) => format!(" in column {}", c),
        None => String::new(),
    }
}

impl CloudError {
    /// Shorthand for an [`CloudError::InvalidParameter`].
    pub fn invalid(parameter: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            detail: detail.into(),
        }
    }

    /// Shorthand for a [`CloudError::ShapeMismatch`].
    pub fn shape(detail: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            detail: detail.into(),
        }
    }

    /// Attach a column index to errors raised while processing one
    /// indicator column.
    pub fn in_column(self, index: usize) -> Self {
        match self {
            Self::InsufficientSample {
                required, actual, ..
            } => Self::InsufficientSample {
                required,
                actual,
                column: Some(index),
            },
            Self::InvalidParameter { parameter, detail } => Self::InvalidParameter {
                parameter: format!("column[{}].{}", index, parameter),
                detail,
            },
            other => other,
        }
    }
}

/// Convenience type alias for cloud engine results.
pub type CloudResult<T> = Result<T, CloudError>;
