//! # Movie Catalog Server
//!
//! Entry point: logging, configuration, database, sessions, router, listener.

use anyhow::Context;
use movie_catalog::{app, config::Config, state::AppState};
// SQLite-backed session storage
use tower_sessions_sqlx_store::SqliteStore;
// Structured logging setup
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main application entry point
///
/// 1. Sets up logging
/// 2. Loads configuration from environment variables
/// 3. Connects to the database and runs migrations (fatal on failure)
/// 4. Configures the session store
/// 5. Builds the router and starts the HTTP server
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Default: info level for most crates, debug level for our app
    // Can be overridden with RUST_LOG environment variable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,movie_catalog=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded: {:?}", config);

    let app_state = AppState::new(&config).await.inspect_err(|e| {
        tracing::error!("Database initialization failed: {e:#}");
    })?;
    tracing::info!("Database connected");

    // Session data lives server-side in the same SQLite database
    let session_store = SqliteStore::new(app_state.db.clone());
    session_store
        .migrate()
        .await
        .context("failed to create session tables")?;

    let sessions = app::session_layer(session_store, config.cookie_secure);
    let router = app::router(app_state, sessions, &config.static_dir);

    let bind_addr = config.bind_address();
    tracing::info!("App listening on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    axum::serve(listener, router).await?;

    Ok(())
}
