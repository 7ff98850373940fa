use movie_ratings::{
    api::{create_router, AppState},
    config::Config,
    store::{load_seed, InMemoryStore},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movie_ratings=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Start from the seed file when one is configured
    let store = match &config.seed_file {
        Some(path) => load_seed(path)?,
        None => InMemoryStore::new(),
    };

    let address = config.bind_address();
    let state = AppState::new(store, config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
