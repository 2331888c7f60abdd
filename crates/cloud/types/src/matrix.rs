//! Score matrices and weight vectors.
//!
//! A [`ScoreMatrix`] holds expert scores (rows = experts, columns =
//! indicators). A [`WeightVector`] assigns one non-negative weight per
//! indicator, paired with matrix columns by position.

use serde::{Deserialize, Serialize};

use crate::error::{CloudError, CloudResult};

// ── Score Matrix ────────────────────────────────────────────────────────

/// Rectangular experts × indicators score matrix, stored row-major.
///
/// Read-only once constructed. Every cell is finite.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct ScoreMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<f64>,
}

impl ScoreMatrix {
    /// Build a matrix from expert rows.
    ///
    /// Fails with `ShapeMismatch` when there are no rows, no columns, or
    /// rows of unequal length, and with `InvalidParameter` on non-finite
    /// cells.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> CloudResult<Self> {
        let first = rows
            .first()
            .ok_or_else(|| CloudError::shape("score matrix has no expert rows"))?;
        let cols = first.as_ref().len();
        if cols == 0 {
            return Err(CloudError::shape("score matrix has no indicator columns"));
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(CloudError::shape(format!(
                    "row {} has {} columns, expected {}",
                    r,
                    row.len(),
                    cols
                )));
            }
            for (c, &v) in row.iter().enumerate() {
                if !v.is_finite() {
                    return Err(CloudError::invalid(
                        format!("matrix[{}][{}]", r, c),
                        format!("score must be finite, got {}", v),
                    ));
                }
            }
            cells.extend_from_slice(row);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /// Number of experts.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of indicators.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// One expert's scores.
    pub fn row(&self, r: usize) -> Option<&[f64]> {
        if r >= self.rows {
            return None;
        }
        Some(&self.cells[r * self.cols..(r + 1) * self.cols])
    }

    /// All experts' scores for one indicator, in row order.
    pub fn column(&self, c: usize) -> Option<Vec<f64>> {
        if c >= self.cols {
            return None;
        }
        Some(
            (0..self.rows)
                .map(|r| self.cells[r * self.cols + c])
                .collect(),
        )
    }

    /// Iterate columns in order.
    pub fn columns(&self) -> impl Iterator<Item = Vec<f64>> + '_ {
        (0..self.cols).filter_map(move |c| self.column(c))
    }

    pub fn get(&self, r: usize, c: usize) -> Option<f64> {
        if r < self.rows && c < self.cols {
            Some(self.cells[r * self.cols + c])
        } else {
            None
        }
    }
}

impl TryFrom<Vec<Vec<f64>>> for ScoreMatrix {
    type Error = CloudError;

    fn try_from(rows: Vec<Vec<f64>>) -> CloudResult<Self> {
        Self::from_rows(&rows)
    }
}

impl From<ScoreMatrix> for Vec<Vec<f64>> {
    fn from(m: ScoreMatrix) -> Self {
        m.cells.chunks(m.cols).map(|row| row.to_vec()).collect()
    }
}

// ── Weight Vector ───────────────────────────────────────────────────────

/// Per-indicator weights. Not required to sum to 1.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct WeightVector(Vec<f64>);

impl WeightVector {
    /// Validate and wrap caller weights. Each weight must be finite and
    /// non-negative. An empty vector is allowed here; it fails later if
    /// normalization is attempted.
    pub fn new(weights: Vec<f64>) -> CloudResult<Self> {
        for (i, &w) in weights.iter().enumerate() {
            if !w.is_finite() || w < 0.0 {
                return Err(CloudError::invalid(
                    format!("weights[{}]", i),
                    format!("weight must be finite and non-negative, got {}", w),
                ));
            }
        }
        Ok(Self(weights))
    }

    /// `n` equal weights of `1/n`.
    pub fn equal(n: usize) -> Self {
        if n == 0 {
            return Self(Vec::new());
        }
        Self(vec![1.0 / n as f64; n])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<f64> {
        self.0.get(i).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Weights scaled to sum to 1. The receiver is left untouched.
    ///
    /// Finite weights can still sum past `f64::MAX`; in that case every
    /// weight is first divided by the largest one, which leaves the ratios
    /// unchanged.
    pub fn normalized(&self) -> CloudResult<Vec<f64>> {
        if self.0.is_empty() {
            return Err(CloudError::invalid(
                "weights",
                "cannot normalize an empty weight vector",
            ));
        }
        let total = self.total();
        if total <= 0.0 {
            return Err(CloudError::DegenerateAggregation {
                total_weight: total,
            });
        }
        if total.is_finite() {
            return Ok(self.0.iter().map(|w| w / total).collect());
        }

        let max = self.0.iter().copied().fold(0.0, f64::max);
        let scaled: Vec<f64> = self.0.iter().map(|w| w / max).collect();
        let scaled_total: f64 = scaled.iter().sum();
        Ok(scaled.iter().map(|w| w / scaled_total).collect())
    }
}

impl TryFrom<Vec<f64>> for WeightVector {
    type Error = CloudError;

    fn try_from(v: Vec<f64>) -> CloudResult<Self> {
        Self::new(v)
    }
}

impl From<WeightVector> for Vec<f64> {
    fn from(w: WeightVector) -> Self {
        w.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_matrix() -> ScoreMatrix {
        ScoreMatrix::from_rows(&[
            vec![80.0, 70.0, 90.0],
            vec![85.0, 75.0, 88.0],
            vec![78.0, 72.0, 92.0],
        ])
        .unwrap()
    }

    #[test]
    fn dimensions() {
        let m = sample_matrix();
        assert_eq!(m.rows(), 3);
        assert_eq!(m.cols(), 3);
    }

    #[test]
    fn column_extraction_preserves_row_order() {
        let m = sample_matrix();
        assert_eq!(m.column(1).unwrap(), vec![70.0, 75.0, 72.0]);
        assert!(m.column(3).is_none());
        let cols: Vec<_> = m.columns().collect();
        assert_eq!(cols.len(), 3);
        assert_eq!(cols[2], vec![90.0, 88.0, 92.0]);
    }

    #[test]
    fn row_and_cell_access() {
        let m = sample_matrix();
        assert_eq!(m.row(1).unwrap(), &[85.0, 75.0, 88.0]);
        assert!(m.row(3).is_none());
        assert_eq!(m.get(2, 2), Some(92.0));
        assert_eq!(m.get(0, 5), None);
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = ScoreMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, CloudError::ShapeMismatch { .. }));
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn empty_matrix_rejected() {
        let rows: Vec<Vec<f64>> = Vec::new();
        assert!(matches!(
            ScoreMatrix::from_rows(&rows),
            Err(CloudError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            ScoreMatrix::from_rows(&[Vec::<f64>::new()]),
            Err(CloudError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn non_finite_cell_rejected() {
        let err = ScoreMatrix::from_rows(&[vec![1.0, f64::NAN]]).unwrap_err();
        assert!(err.to_string().contains("matrix[0][1]"));
    }

    #[test]
    fn matrix_serde_as_nested_rows() {
        let m = sample_matrix();
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.starts_with("[[80.0,70.0,90.0]"));
        let restored: ScoreMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, m);

        let bad: Result<ScoreMatrix, _> = serde_json::from_str("[[1.0,2.0],[3.0]]");
        assert!(bad.is_err());
    }

    #[test]
    fn weights_reject_negative_and_nan() {
        assert!(WeightVector::new(vec![0.5, -0.1]).is_err());
        assert!(WeightVector::new(vec![f64::NAN]).is_err());
        assert!(WeightVector::new(vec![0.0, 0.0]).is_ok());
    }

    #[test]
    fn equal_weights() {
        let w = WeightVector::equal(4);
        assert_eq!(w.len(), 4);
        assert!((w.total() - 1.0).abs() < 1e-12);
        assert!(WeightVector::equal(0).is_empty());
    }

    #[test]
    fn normalization_does_not_mutate() {
        let w = WeightVector::new(vec![2.0, 6.0]).unwrap();
        let n = w.normalized().unwrap();
        assert_eq!(n, vec![0.25, 0.75]);
        assert_eq!(w.as_slice(), &[2.0, 6.0]);
    }

    #[test]
    fn normalization_failures() {
        let empty = WeightVector::new(Vec::new()).unwrap();
        assert!(matches!(
            empty.normalized(),
            Err(CloudError::InvalidParameter { .. })
        ));
        let zeros = WeightVector::new(vec![0.0, 0.0]).unwrap();
        assert!(matches!(
            zeros.normalized(),
            Err(CloudError::DegenerateAggregation { .. })
        ));
    }

    #[test]
    fn normalization_survives_overflowing_total() {
        let w = WeightVector::new(vec![1e308, 1e308, 0.0]).unwrap();
        assert!(w.total().is_infinite());
        let n = w.normalized().unwrap();
        assert_eq!(n, vec![0.5, 0.5, 0.0]);

        let skewed = WeightVector::new(vec![f64::MAX, f64::MAX / 3.0]).unwrap();
        let n = skewed.normalized().unwrap();
        assert!((n[0] - 0.75).abs() < 1e-12);
        assert!((n[1] - 0.25).abs() < 1e-12);
    }
}
