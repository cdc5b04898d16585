//! Case desk backend for legal practitioners.
//!
//! JSON API behind the dashboard: login, client and case records, and the
//! dashboard counters. Records live in Redis when `REDIS_URL` is set and in
//! process memory otherwise.
//!
//! # Routes
//! - `POST /api/auth/login`
//! - `GET|POST /api/clients`, `POST /api/clients/validate`
//! - `GET|POST /api/cases`
//! - `GET /api/dashboard/stats` (bearer token)
//! - `POST /api/seed` (seed key)
//! - `GET /health`
//!
//! Anything else is served from `STATIC_DIR` when it is set, which is where
//! the built dashboard goes.
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{get, post},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod database;
pub mod error;
pub mod messages;
pub mod routes;
pub mod seed;
pub mod state;
pub mod store;
pub mod utils;

use config::{Config, ConfigError};
use routes::{
    create_case_handler, create_client_handler, health_handler, list_cases_handler,
    list_clients_handler, login_handler, seed_handler, stats_handler, validate_client_handler,
};
use state::State;

pub fn init_tracing() {
    let _ = fmt().with_env_filter(EnvFilter::from_default_env()).try_init();
}

/// Installs tracing, then loads config so its log lines are not dropped.
pub fn load_config() -> Result<Config, ConfigError> {
    init_tracing();

    Config::load()
}

pub fn app(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    let mut app = Router::new()
        .route("/api/auth/login", post(login_handler))
        .route("/api/clients", get(list_clients_handler).post(create_client_handler))
        .route("/api/clients/validate", post(validate_client_handler))
        .route("/api/cases", get(list_cases_handler).post(create_case_handler))
        .route("/api/dashboard/stats", get(stats_handler))
        .route("/api/seed", post(seed_handler))
        .route("/health", get(health_handler));

    if let Some(static_dir) = &state.config.static_dir {
        info!("Serving dashboard from {}", static_dir.display());
        app = app.fallback_service(ServeDir::new(static_dir));
    }

    app.layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(config: Config) -> anyhow::Result<()> {
    info!("Initializing state...");
    let state = State::new(config).await?;

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_is_live_once_config_loads() {
        let _ = load_config();

        // A second global subscriber is refused once one is installed.
        assert!(fmt().try_init().is_err());
    }
}
