pub mod loader;
pub mod matrix;

pub use loader::load;
pub use matrix::SimilarityMatrix;

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::{AppError, AppResult};
use crate::models::MovieRecord;

/// Immutable, precomputed recommendation data
///
/// Holds the movie catalog and the similarity matrix, validated so that the
/// two agree on dimensions. Constructed once at startup and shared read-only
/// behind an `Arc`; nothing mutates it afterwards.
pub struct MovieStore {
    movies: Vec<MovieRecord>,
    matrix: SimilarityMatrix,
    title_index: HashMap<String, usize>,
    loaded_at: DateTime<Utc>,
}

impl MovieStore {
    /// Assembles a store from a catalog and a matrix, validating shape
    ///
    /// Rejects a catalog whose length differs from the matrix dimension,
    /// records whose `row_index` does not match their position, and duplicate
    /// titles (title is the lookup key, so duplicates would make resolution
    /// ambiguous).
    pub fn new(movies: Vec<MovieRecord>, matrix: SimilarityMatrix) -> AppResult<Self> {
        if movies.len() != matrix.dim() {
            return Err(AppError::ShapeMismatch(format!(
                "catalog has {} movies but similarity matrix is {}x{}",
                movies.len(),
                matrix.dim(),
                matrix.dim()
            )));
        }

        let mut title_index = HashMap::with_capacity(movies.len());
        for (position, record) in movies.iter().enumerate() {
            if record.row_index != position {
                return Err(AppError::Load(format!(
                    "catalog entry at position {} has row_index {}",
                    position, record.row_index
                )));
            }
            if title_index.insert(record.title.clone(), position).is_some() {
                return Err(AppError::Load(format!(
                    "duplicate title in catalog: {:?}",
                    record.title
                )));
            }
        }

        Ok(Self {
            movies,
            matrix,
            title_index,
            loaded_at: Utc::now(),
        })
    }

    /// Number of movies in the catalog
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    /// True if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Resolves a title to its row index by exact match
    pub fn resolve_title(&self, title: &str) -> Option<usize> {
        self.title_index.get(title).copied()
    }

    /// Returns the catalog record at `index`
    pub fn record(&self, index: usize) -> Option<&MovieRecord> {
        self.movies.get(index)
    }

    /// Similarity row for catalog index `index`
    pub fn similarity_row(&self, index: usize) -> Option<&[f32]> {
        self.matrix.row(index)
    }

    /// All catalog titles in row order
    pub fn titles(&self) -> Vec<&str> {
        self.movies.iter().map(|m| m.title.as_str()).collect()
    }

    /// When this store was constructed
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn record(index: usize, title: &str) -> MovieRecord {
        MovieRecord {
            row_index: index,
            external_id: 1000 + index as u64,
            title: title.to_string(),
        }
    }

    #[test]
    fn test_store_construction() {
        let movies = vec![record(0, "Inception"), record(1, "Interstellar")];
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0, 0.8], vec![0.8, 1.0]]).unwrap();

        let store = MovieStore::new(movies, matrix).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.resolve_title("Inception"), Some(0));
        assert_eq!(store.resolve_title("Interstellar"), Some(1));
        assert_eq!(store.titles(), vec!["Inception", "Interstellar"]);
    }

    #[test]
    fn test_store_rejects_count_mismatch() {
        let movies = vec![record(0, "Inception")];
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0, 0.8], vec![0.8, 1.0]]).unwrap();

        let result = MovieStore::new(movies, matrix);
        assert!(matches!(result, Err(AppError::ShapeMismatch(_))));
    }

    #[test]
    fn test_store_rejects_out_of_order_row_index() {
        let movies = vec![record(1, "Inception"), record(0, "Interstellar")];
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0, 0.8], vec![0.8, 1.0]]).unwrap();

        let result = MovieStore::new(movies, matrix);
        assert!(matches!(result, Err(AppError::Load(_))));
    }

    #[test]
    fn test_store_rejects_duplicate_titles() {
        let movies = vec![record(0, "Inception"), record(1, "Inception")];
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0, 0.8], vec![0.8, 1.0]]).unwrap();

        let result = MovieStore::new(movies, matrix);
        assert!(matches!(result, Err(AppError::Load(_))));
    }

    #[test]
    fn test_resolve_title_is_exact_match() {
        let movies = vec![record(0, "Inception")];
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0]]).unwrap();
        let store = MovieStore::new(movies, matrix).unwrap();

        assert_eq!(store.resolve_title("inception"), None);
        assert_eq!(store.resolve_title("Inception "), None);
    }
}
