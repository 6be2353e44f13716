use std::path::Path;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::MovieRecord;
use crate::store::{MovieStore, SimilarityMatrix};

/// Loads the movie catalog and similarity matrix into a validated store
///
/// Each blob is read from its configured local path. If a blob is missing and
/// a remote URL is configured for it, the blob is fetched once and written
/// back to the local path so later startups skip the download.
pub async fn load(config: &Config) -> AppResult<MovieStore> {
    let movies_bytes = read_or_fetch(&config.movies_path, config.movies_url.as_deref()).await?;
    let similarity_bytes =
        read_or_fetch(&config.similarity_path, config.similarity_url.as_deref()).await?;

    let movies: Vec<MovieRecord> = serde_json::from_slice(&movies_bytes)
        .map_err(|e| AppError::Load(format!("failed to parse movie catalog: {}", e)))?;
    let rows: Vec<Vec<f32>> = serde_json::from_slice(&similarity_bytes)
        .map_err(|e| AppError::Load(format!("failed to parse similarity matrix: {}", e)))?;

    let matrix = SimilarityMatrix::from_rows(rows)?;
    let store = MovieStore::new(movies, matrix)?;

    tracing::info!(
        movies = store.len(),
        "Similarity store loaded"
    );

    Ok(store)
}

/// Reads a blob from disk, fetching it from `url` on a local miss
async fn read_or_fetch(path: &str, url: Option<&str>) -> AppResult<Vec<u8>> {
    if Path::new(path).exists() {
        return Ok(tokio::fs::read(path).await?);
    }

    let url = url.ok_or_else(|| {
        AppError::Load(format!(
            "data file {} is missing and no remote URL is configured",
            path
        ))
    })?;

    tracing::info!(path = %path, url = %url, "Local data file missing, fetching from remote");

    let response = reqwest::get(url).await?;
    if !response.status().is_success() {
        return Err(AppError::Load(format!(
            "remote fetch of {} returned status {}",
            url,
            response.status()
        )));
    }
    let bytes = response.bytes().await?.to_vec();

    // Cache for the next startup; a failed write only costs a re-fetch.
    if let Err(e) = write_cache(path, &bytes).await {
        tracing::warn!(path = %path, error = %e, "Failed to cache fetched data file");
    }

    Ok(bytes)
}

async fn write_cache(path: &str, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(path, bytes).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(movies_path: &Path, similarity_path: &Path) -> Config {
        Config {
            movies_path: movies_path.to_str().unwrap().to_string(),
            similarity_path: similarity_path.to_str().unwrap().to_string(),
            movies_url: None,
            similarity_url: None,
            tmdb_api_key: "test_key".to_string(),
            tmdb_api_url: "http://test.local".to_string(),
            tmdb_image_url: "http://images.test.local/w500".to_string(),
            placeholder_url: "http://placeholder.test.local/none".to_string(),
            poster_timeout_secs: 1,
            host: "127.0.0.1".to_string(),
            port: 0,
        }
    }

    #[tokio::test]
    async fn test_load_from_local_files() {
        let dir = tempfile::tempdir().unwrap();
        let movies_path = dir.path().join("movies.json");
        let similarity_path = dir.path().join("similarity.json");

        std::fs::write(
            &movies_path,
            r#"[
                {"row_index": 0, "external_id": 27205, "title": "Inception"},
                {"row_index": 1, "external_id": 157336, "title": "Interstellar"}
            ]"#,
        )
        .unwrap();
        std::fs::write(&similarity_path, "[[1.0, 0.8], [0.8, 1.0]]").unwrap();

        let store = load(&test_config(&movies_path, &similarity_path))
            .await
            .unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.resolve_title("Interstellar"), Some(1));
    }

    #[tokio::test]
    async fn test_load_fails_when_missing_and_no_url() {
        let dir = tempfile::tempdir().unwrap();
        let movies_path = dir.path().join("movies.json");
        let similarity_path = dir.path().join("similarity.json");

        let result = load(&test_config(&movies_path, &similarity_path)).await;
        assert!(matches!(result, Err(AppError::Load(_))));
    }

    #[tokio::test]
    async fn test_load_fails_on_corrupt_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let movies_path = dir.path().join("movies.json");
        let similarity_path = dir.path().join("similarity.json");

        std::fs::write(&movies_path, "not json").unwrap();
        std::fs::write(&similarity_path, "[[1.0]]").unwrap();

        let result = load(&test_config(&movies_path, &similarity_path)).await;
        assert!(matches!(result, Err(AppError::Load(_))));
    }

    #[tokio::test]
    async fn test_load_fails_on_dimension_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let movies_path = dir.path().join("movies.json");
        let similarity_path = dir.path().join("similarity.json");

        std::fs::write(
            &movies_path,
            r#"[{"row_index": 0, "external_id": 27205, "title": "Inception"}]"#,
        )
        .unwrap();
        std::fs::write(&similarity_path, "[[1.0, 0.8], [0.8, 1.0]]").unwrap();

        let result = load(&test_config(&movies_path, &similarity_path)).await;
        assert!(matches!(result, Err(AppError::ShapeMismatch(_))));
    }

    #[tokio::test]
    async fn test_load_fails_on_non_square_matrix() {
        let dir = tempfile::tempdir().unwrap();
        let movies_path = dir.path().join("movies.json");
        let similarity_path = dir.path().join("similarity.json");

        std::fs::write(
            &movies_path,
            r#"[{"row_index": 0, "external_id": 27205, "title": "Inception"}]"#,
        )
        .unwrap();
        std::fs::write(&similarity_path, "[[1.0, 0.8]]").unwrap();

        let result = load(&test_config(&movies_path, &similarity_path)).await;
        assert!(matches!(result, Err(AppError::ShapeMismatch(_))));
    }
}
