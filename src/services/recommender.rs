use crate::error::{AppError, AppResult};
use crate::models::RankedMovie;
use crate::store::MovieStore;

/// Maximum number of recommendations returned per query
pub const RECOMMENDATION_COUNT: usize = 4;

/// Returns the movies most similar to `title`, best first
///
/// Resolves the title to a catalog row, ranks every other row by descending
/// similarity score, and returns up to [`RECOMMENDATION_COUNT`] entries. Ties
/// are broken by ascending catalog index: the candidates are enumerated in
/// index order and the sort is stable.
///
/// The queried row is excluded by index, not by dropping the top-ranked
/// entry, so results stay correct even if some other row ties the diagonal.
///
/// Pure function of the store and the title; fails only with `NotFound` for
/// a title that is not in the catalog.
pub fn recommend(store: &MovieStore, title: &str) -> AppResult<Vec<RankedMovie>> {
    let queried = store
        .resolve_title(title)
        .ok_or_else(|| AppError::NotFound(format!("no movie titled {:?}", title)))?;

    let row = store.similarity_row(queried).ok_or_else(|| {
        AppError::Internal(format!("no similarity row for catalog index {}", queried))
    })?;

    let mut candidates: Vec<(usize, f32)> = row
        .iter()
        .copied()
        .enumerate()
        .filter(|(index, _)| *index != queried)
        .collect();
    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    candidates
        .into_iter()
        .take(RECOMMENDATION_COUNT)
        .map(|(index, score)| {
            let record = store.record(index).ok_or_else(|| {
                AppError::Internal(format!("similarity row references unknown index {}", index))
            })?;
            Ok(RankedMovie {
                title: record.title.clone(),
                external_id: record.external_id,
                score,
            })
        })
        .collect()
}
