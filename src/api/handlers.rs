use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::services::{posters, recommender};

use super::AppState;

/// TMDB detail-page base, used to link each recommendation to its catalog page
const TMDB_MOVIE_PAGE_URL: &str = "https://www.themoviedb.org/movie";

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct MoviesResponse {
    pub titles: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendedMovie {
    pub title: String,
    pub external_id: u64,
    pub score: f32,
    pub poster_url: String,
    pub tmdb_url: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub query: String,
    pub results: Vec<RecommendedMovie>,
}

// Handlers

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "movies": state.store.len(),
        "loaded_at": state.store.loaded_at(),
    }))
}

/// All catalog titles in row order, for the UI's selection dropdown
pub async fn list_movies(State(state): State<AppState>) -> Json<MoviesResponse> {
    let titles = state
        .store
        .titles()
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(MoviesResponse { titles })
}

/// Ranked recommendations for a title, decorated with poster art
///
/// Recommendation failures (unknown title) surface to the caller; poster
/// lookup failures never do, each failed slot carries the placeholder URL
/// chosen by the resolver.
pub async fn recommendations(
    State(state): State<AppState>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationsResponse>> {
    if params.title.trim().is_empty() {
        return Err(AppError::InvalidInput("title cannot be empty".to_string()));
    }

    let ranked = recommender::recommend(&state.store, &params.title)?;

    let external_ids: Vec<u64> = ranked.iter().map(|r| r.external_id).collect();
    let poster_urls = posters::resolve_posters(state.posters.clone(), &external_ids).await;

    let results = ranked
        .into_iter()
        .zip(poster_urls)
        .map(|(movie, poster_url)| RecommendedMovie {
            tmdb_url: format!("{}/{}", TMDB_MOVIE_PAGE_URL, movie.external_id),
            title: movie.title,
            external_id: movie.external_id,
            score: movie.score,
            poster_url,
        })
        .collect();

    tracing::info!(
        title = %params.title,
        results = external_ids.len(),
        "Recommendation served"
    );

    Ok(Json(RecommendationsResponse {
        query: params.title,
        results,
    }))
}
