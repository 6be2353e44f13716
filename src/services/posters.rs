use std::sync::Arc;
use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::TmdbMovieDetails;

/// Poster art lookup abstraction
///
/// One call per recommended movie, keyed by the TMDB external id. Resolution
/// is best-effort decoration: implementations must swallow every failure and
/// return a placeholder URL instead, so a dead metadata service never breaks
/// a recommendation response.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterResolver: Send + Sync {
    /// Returns a poster image URL for the movie, or a placeholder on failure
    async fn fetch_poster_url(&self, external_id: u64) -> String;
}

/// Poster resolver backed by the TMDB movie details endpoint
#[derive(Clone)]
pub struct TmdbPosterResolver {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_url: String,
    placeholder_url: String,
}

impl TmdbPosterResolver {
    /// Creates a resolver with a fixed per-request timeout
    pub fn new(config: &Config) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.poster_timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            api_key: config.tmdb_api_key.clone(),
            api_url: config.tmdb_api_url.clone(),
            image_url: config.tmdb_image_url.clone(),
            placeholder_url: config.placeholder_url.clone(),
        })
    }

    /// Joins the image CDN base with a TMDB `poster_path`
    fn image_url_for(&self, poster_path: &str) -> String {
        format!("{}{}", self.image_url, poster_path)
    }

    async fn try_fetch(&self, external_id: u64) -> AppResult<String> {
        let url = format!("{}/3/movie/{}", self.api_url, external_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("language", "en-US")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {} for movie {}",
                response.status(),
                external_id
            )));
        }

        let details: TmdbMovieDetails = response.json().await?;

        details
            .poster_path
            .as_deref()
            .map(|path| self.image_url_for(path))
            .ok_or_else(|| {
                AppError::ExternalApi(format!("TMDB movie {} has no poster_path", external_id))
            })
    }
}

#[async_trait::async_trait]
impl PosterResolver for TmdbPosterResolver {
    async fn fetch_poster_url(&self, external_id: u64) -> String {
        match self.try_fetch(external_id).await {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(
                    external_id = external_id,
                    error = %e,
                    "Poster lookup failed, using placeholder"
                );
                self.placeholder_url.clone()
            }
        }
    }
}

/// Resolves posters for a batch of movies in parallel
///
/// Spawns one task per id and preserves input order in the output. A panicked
/// task degrades to an empty URL slot rather than failing the batch.
pub async fn resolve_posters(resolver: Arc<dyn PosterResolver>, external_ids: &[u64]) -> Vec<String> {
    let mut tasks = Vec::with_capacity(external_ids.len());

    for &external_id in external_ids {
        let resolver = Arc::clone(&resolver);
        tasks.push(tokio::spawn(async move {
            resolver.fetch_poster_url(external_id).await
        }));
    }

    let mut urls = Vec::with_capacity(tasks.len());
    for task in tasks {
        match task.await {
            Ok(url) => urls.push(url),
            Err(e) => {
                tracing::error!(error = %e, "Poster task join error");
                urls.push(String::new());
            }
        }
    }

    urls
}
