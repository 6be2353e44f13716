use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Local path for the serialized movie catalog
    #[serde(default = "default_movies_path")]
    pub movies_path: String,

    /// Local path for the serialized similarity matrix
    #[serde(default = "default_similarity_path")]
    pub similarity_path: String,

    /// Remote URL to fetch the movie catalog from if it is missing locally
    #[serde(default)]
    pub movies_url: Option<String>,

    /// Remote URL to fetch the similarity matrix from if it is missing locally
    #[serde(default)]
    pub similarity_url: Option<String>,

    /// TMDB API key used for poster lookups
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// TMDB image CDN base URL (w500 renditions)
    #[serde(default = "default_tmdb_image_url")]
    pub tmdb_image_url: String,

    /// Poster URL returned when a lookup fails
    #[serde(default = "default_placeholder_url")]
    pub placeholder_url: String,

    /// Per-request timeout for poster lookups, in seconds
    #[serde(default = "default_poster_timeout_secs")]
    pub poster_timeout_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_movies_path() -> String {
    "data/movies.json".to_string()
}

fn default_similarity_path() -> String {
    "data/similarity.json".to_string()
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org".to_string()
}

fn default_tmdb_image_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_placeholder_url() -> String {
    "https://via.placeholder.com/500x750?text=No+Image".to_string()
}

fn default_poster_timeout_secs() -> u64 {
    10
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
