//! Main entry point for the churn prediction backend.
//!
//! This file initializes logging and configuration, builds the application
//! state (model + credential store), and serves the Axum router.

mod api;
mod app;
mod auth;
mod config;
mod database;
mod errors;
mod middleware;
mod services;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{AppError, AppState};
use config::Config;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(
        model_path = %config.model_path,
        database_url = %config.database_url,
        max_body_bytes = ?config.max_body_bytes,
        "Loaded configuration"
    );

    let state = AppState::new(&config).await?;
    let app = app::router(state, &config);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
