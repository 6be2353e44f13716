use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinematch_api::api::{create_router, AppState};
use cinematch_api::config::Config;
use cinematch_api::services::TmdbPosterResolver;
use cinematch_api::store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinematch_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // The similarity store is fatal-on-failure: without valid data there is
    // nothing to serve.
    let movie_store = store::load(&config).await?;
    let posters = TmdbPosterResolver::new(&config)?;

    let state = AppState::new(Arc::new(movie_store), Arc::new(posters));
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
