use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, SantaError};

/// Square table of marginal probabilities, `cell(i, j) = P(i gives to j)`.
///
/// Rows and columns follow participant index order. The matrix is immutable
/// once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<f64>>", try_from = "Vec<Vec<f64>>")]
pub struct ProbabilityMatrix {
    size: usize,
    cells: Vec<f64>,
}

impl ProbabilityMatrix {
    /// Builds a matrix from row-major cells.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, SantaError> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(SantaError::InvalidArgument(
                    ErrorInfo::new("matrix_shape", "matrix rows must be square")
                        .with_context("row", index)
                        .with_context("expected", size)
                        .with_context("actual", row.len()),
                ));
            }
            cells.extend(row);
        }
        Ok(Self { size, cells })
    }

    pub(crate) fn from_cells(size: usize, cells: Vec<f64>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self { size, cells }
    }

    /// Builds an `n x n` matrix by evaluating `f(i, j)` for every cell.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut cells = Vec::with_capacity(size * size);
        for i in 0..size {
            for j in 0..size {
                cells.push(f(i, j));
            }
        }
        Self::from_cells(size, cells)
    }

    /// Number of participants.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Probability that `giver` is assigned `recipient`, if both are in range.
    pub fn get(&self, giver: usize, recipient: usize) -> Option<f64> {
        if giver >= self.size || recipient >= self.size {
            return None;
        }
        Some(self.cells[giver * self.size + recipient])
    }

    /// Outgoing distribution of one participant.
    pub fn row(&self, giver: usize) -> Result<&[f64], SantaError> {
        if giver >= self.size {
            return Err(SantaError::InvalidArgument(
                ErrorInfo::new("participant_index", "participant index out of range")
                    .with_context("index", giver)
                    .with_context("size", self.size),
            ));
        }
        let start = giver * self.size;
        Ok(&self.cells[start..start + self.size])
    }

    /// Iterates rows in giver order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        // chunk size must be non-zero even for an empty matrix
        self.cells.chunks_exact(self.size.max(1)).take(self.size)
    }

    /// Copies the matrix into nested vectors.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }

    /// Sum of each row.
    pub fn row_sums(&self) -> Vec<f64> {
        self.rows().map(|row| row.iter().sum()).collect()
    }

    /// Sum of each column. Not constrained to one by the assignment procedure.
    pub fn column_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.size];
        for row in self.rows() {
            for (sum, value) in sums.iter_mut().zip(row) {
                *sum += value;
            }
        }
        sums
    }

    /// Copy of the matrix where every row except `giver` is zeroed.
    pub fn isolate_row(&self, giver: usize) -> Result<Self, SantaError> {
        let row = self.row(giver)?.to_vec();
        let mut cells = vec![0.0; self.cells.len()];
        let start = giver * self.size;
        cells[start..start + self.size].copy_from_slice(&row);
        Ok(Self::from_cells(self.size, cells))
    }

    /// Largest absolute cell difference, or `None` when shapes differ.
    pub fn max_abs_diff(&self, other: &Self) -> Option<f64> {
        if self.size != other.size {
            return None;
        }
        Some(
            self.cells
                .iter()
                .zip(&other.cells)
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max),
        )
    }

    /// Fails with [`SantaError::NumericDrift`] when a row does not sum to one.
    pub fn check_row_sums(&self, tolerance: f64) -> Result<(), SantaError> {
        for (giver, sum) in self.row_sums().into_iter().enumerate() {
            let drift = (sum - 1.0).abs();
            if drift > tolerance {
                return Err(SantaError::NumericDrift(
                    ErrorInfo::new("row_sum_drift", "row probabilities do not sum to one")
                        .with_context("row", giver)
                        .with_context("sum", sum)
                        .with_context("tolerance", tolerance),
                ));
            }
        }
        Ok(())
    }
}

impl From<ProbabilityMatrix> for Vec<Vec<f64>> {
    fn from(matrix: ProbabilityMatrix) -> Self {
        matrix.to_rows()
    }
}

impl TryFrom<Vec<Vec<f64>>> for ProbabilityMatrix {
    type Error = SantaError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProbabilityMatrix {
        ProbabilityMatrix::from_rows(vec![
            vec![0.0, 0.25, 0.75],
            vec![0.5, 0.0, 0.5],
            vec![1.0, 0.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn row_view_and_sums() {
        let matrix = sample();
        assert_eq!(matrix.row(1).unwrap(), &[0.5, 0.0, 0.5]);
        assert_eq!(matrix.row_sums(), vec![1.0, 1.0, 1.0]);
        assert_eq!(matrix.column_sums(), vec![1.5, 0.25, 1.25]);
        assert!(matrix.row(3).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn isolate_row_zeroes_others() {
        let isolated = sample().isolate_row(0).unwrap();
        assert_eq!(isolated.to_rows()[0], vec![0.0, 0.25, 0.75]);
        assert_eq!(isolated.row_sums(), vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = ProbabilityMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]).unwrap_err();
        assert_eq!(err.info().code, "matrix_shape");
    }

    #[test]
    fn drift_is_reported() {
        let matrix = ProbabilityMatrix::from_rows(vec![vec![0.0, 0.9], vec![1.0, 0.0]]).unwrap();
        let err = matrix.check_row_sums(1e-6).unwrap_err();
        assert!(matches!(err, SantaError::NumericDrift(_)));
        assert_eq!(err.info().context.get("row").map(String::as_str), Some("0"));
    }
}
