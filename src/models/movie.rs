use serde::{Deserialize, Serialize};

/// A single entry in the movie catalog
///
/// `row_index` is dense and 0-based, and doubles as the row/column index into
/// the similarity matrix. `external_id` is the TMDB catalog identifier used
/// for poster lookups and detail-page links; it is unrelated to `row_index`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    pub row_index: usize,
    pub external_id: u64,
    pub title: String,
}

/// One ranked recommendation produced by the recommender
///
/// `score` is the raw similarity value from the matrix row, kept so callers
/// can verify ordering and so the API can surface it to the UI.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankedMovie {
    pub title: String,
    pub external_id: u64,
    pub score: f32,
}

/// Subset of the TMDB movie details response we care about
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    #[serde(default)]
    pub poster_path: Option<String>,
}
