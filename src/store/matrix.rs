use crate::error::{AppError, AppResult};

/// Precomputed pairwise similarity scores
///
/// Square N×N matrix where entry (i, j) is the similarity between catalog
/// rows i and j. Symmetric by construction upstream; we only validate
/// squareness here. The diagonal holds self-similarity and is excluded from
/// recommendations by the recommender, not by the matrix itself.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    rows: Vec<Vec<f32>>,
}

impl SimilarityMatrix {
    /// Builds a matrix from raw rows, rejecting any non-square input
    pub fn from_rows(rows: Vec<Vec<f32>>) -> AppResult<Self> {
        let dim = rows.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != dim {
                return Err(AppError::ShapeMismatch(format!(
                    "similarity matrix is not square: row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    dim
                )));
            }
        }
        Ok(Self { rows })
    }

    /// Number of rows (and columns)
    pub fn dim(&self) -> usize {
        self.rows.len()
    }

    /// Returns row `index`, or `None` if it is out of bounds
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        self.rows.get(index).map(|r| r.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_matrix_accepted() {
        let matrix =
            SimilarityMatrix::from_rows(vec![vec![1.0, 0.5], vec![0.5, 1.0]]).unwrap();
        assert_eq!(matrix.dim(), 2);
        assert_eq!(matrix.row(0), Some([1.0, 0.5].as_slice()));
    }

    #[test]
    fn test_empty_matrix_accepted() {
        let matrix = SimilarityMatrix::from_rows(vec![]).unwrap();
        assert_eq!(matrix.dim(), 0);
        assert_eq!(matrix.row(0), None);
    }

    #[test]
    fn test_ragged_matrix_rejected() {
        let result = SimilarityMatrix::from_rows(vec![vec![1.0, 0.5], vec![0.5]]);
        assert!(matches!(result, Err(AppError::ShapeMismatch(_))));
    }

    #[test]
    fn test_rectangular_matrix_rejected() {
        let result = SimilarityMatrix::from_rows(vec![vec![1.0, 0.5, 0.2]]);
        assert!(matches!(result, Err(AppError::ShapeMismatch(_))));
    }

    #[test]
    fn test_row_out_of_bounds() {
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0]]).unwrap();
        assert_eq!(matrix.row(1), None);
    }
}
