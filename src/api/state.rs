use std::sync::Arc;

use crate::services::PosterResolver;
use crate::store::MovieStore;

/// Shared application state
///
/// The store is loaded once at startup and only ever read, so it is shared
/// as a plain `Arc` with no lock. The poster resolver sits behind a trait
/// object so tests can substitute a stub for the TMDB client.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MovieStore>,
    pub posters: Arc<dyn PosterResolver>,
}

impl AppState {
    pub fn new(store: Arc<MovieStore>, posters: Arc<dyn PosterResolver>) -> Self {
        Self { store, posters }
    }
}
