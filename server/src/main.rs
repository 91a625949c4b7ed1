mod config;
mod db;
mod routes;
mod services;
mod state;

use std::process::ExitCode;

use tokens::TokenService;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "server exited");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::Config::from_env()?;
    tracing::info!(?config, "configuration loaded");

    let tokens = TokenService::new(&config.jwt_secret)?;
    let pool = db::init_pool(&config.database_url, config.db_max_connections).await?;
    let state = state::AppState::new(pool, tokens, config.token_ttl);

    if !config.static_dir.join("index.html").is_file() {
        tracing::warn!(dir = %config.static_dir.display(), "client bundle not found; only the API will respond");
    }
    let app = routes::app(state, &config.static_dir, config.cors_permissive);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!(port = config.port, ttl = %config.token_ttl, "storefront listening");
    axum::serve(listener, app).await?;
    Ok(())
}
