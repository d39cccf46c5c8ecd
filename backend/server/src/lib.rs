//! Documentation of the CODESPIRE 3.0 top 10 reveal server.
//!
//! The top 10 case files stay sealed behind a countdown. The backend owns the clock, so the
//! frontend can only ask whether it is time yet and never holds the data early.
//!
//!
//!
//! # Endpoints
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | GET | `/api/top10` | `{status: "LOCKED", message}` or `{status: "OPEN", data, message}` |
//! | POST | `/api/force-reveal` | `{status: "SUCCESS", message}` |
//! | POST | `/api/restart` | `{status: "SUCCESS", message, new_reveal_time}` |
//! | GET | `/api/status` | `{time_remaining, is_revealed}` |
//! | GET | `/health` | `{status: "healthy", timestamp}` |
//! | GET | `/` | static frontend |
//!
//! Every response is marked `no-store`, clients must poll.
//!
//!
//!
//! # Environment
//!
//! - `PORT`: listening port, default 5000
//! - `APP_ENV`: `production` binds `0.0.0.0` and adds hardening headers, `development` binds `127.0.0.1`
//! - `REVEAL_OFFSET_SECS`: seconds from start/restart until the reveal, default 30
//! - `STATIC_DIR`: frontend directory, default `frontend`
//! - `CASES_PATH`: optional JSON file replacing the built in case files
//! - `KEEPALIVE_URL` or `RENDER_EXTERNAL_URL`: public URL to self ping, unset disables it
//! - `KEEPALIVE_INTERVAL_SECS` / `KEEPALIVE_TIMEOUT_SECS`: default 840 / 30
//! - `RUST_LOG`: log filter, default `info`
//!
//!
//!
//! # Notes
//!
//! ## Single Instance
//! Gate state lives in memory. Run exactly one server process. With several replicas each one
//! keeps its own deadline and force flag, and `/api/restart` or `/api/force-reveal` only reach
//! whichever replica served the request. A shared store (e.g. Redis) behind the gate would be
//! needed to scale out.
//!
//! ## Status vs Top 10
//! `/api/status` reports `is_revealed` with the same rule as `/api/top10`, force reveal included.
//! `time_remaining` always counts down to the automatic reveal.
//!
//!
//!
//! # Setup
//!
//! Run locally.
//! ```sh
//! RUST_LOG=debug cargo run -p detective
//! ```
//!
//! Watch the countdown from a terminal.
//! ```sh
//! cargo run -p watcher -- --url http://127.0.0.1:5000
//! ```
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{
        Method,
        header::{CACHE_CONTROL, CONTENT_TYPE, PRAGMA},
    },
    routing::{get, post},
};
#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod gate;
pub mod keepalive;
pub mod routes;
pub mod state;
pub mod utils;

use config::Config;
use error::AppError;
use keepalive::spawn_keepalive;
use routes::{
    api_fallback, force_reveal_handler, health_handler, restart_handler, status_handler,
    top10_handler,
};
use state::State;
use utils::{no_cache_headers, production_headers};

pub async fn start_server() -> Result<(), AppError> {
    init_tracing();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = State::new(config)?;

    info!(
        "Reveal time set: {} ({}s from now)",
        state.gate.deadline().format("%H:%M:%S"),
        state.gate.offset().num_seconds()
    );

    let keepalive = spawn_keepalive(&state.config);

    let address = state.config.address();
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on http://{address}");
    info!("Frontend: http://{address}/");
    info!("API: http://{address}/api/top10");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = keepalive {
        handle.abort();
    }

    info!("Server shut down");
    Ok(())
}

pub fn build_router(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, CACHE_CONTROL, PRAGMA])
        .max_age(Duration::from_secs(60 * 60));

    let api = Router::new()
        .route("/top10", get(top10_handler))
        .route("/force-reveal", post(force_reveal_handler))
        .route("/restart", post(restart_handler))
        .route("/status", get(status_handler))
        .fallback(api_fallback);

    let mut app = Router::new()
        .nest("/api", api)
        .route("/health", get(health_handler))
        .fallback_service(ServeDir::new(&state.config.static_dir));

    if state.config.is_production() {
        for (name, value) in production_headers() {
            app = app.layer(SetResponseHeaderLayer::overriding(name, value));
        }
    }

    for (name, value) in no_cache_headers() {
        app = app.layer(SetResponseHeaderLayer::overriding(name, value));
    }

    app.layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if fmt().with_env_filter(filter).try_init().is_err() {
        error!("Tracing subscriber already installed");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
