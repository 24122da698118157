//! Documentation of a translation-saving backend.
//!
//! Stores pairs of original and translated text for the browser extension,
//! persisted in a remote MongoDB collection.
//!
//!
//!
//! # General Infrastructure
//! - Thin HTTP layer in front of a single MongoDB collection
//! - One collection handle created at startup, shared across handlers
//! - MongoDB connects lazily, so an unreachable cluster degrades requests
//!   individually instead of preventing startup
//! - No auth layer, records are scoped by a fixed user id for now
//!
//!
//!
//! # Endpoints
//!
//! | Method | Path | Body |
//! |---|---|---|
//! | POST | /salvar | `{original, translated}` |
//! | GET | /traduzidas/{user_id} | — |
//! | PUT | /traducao/{id} | `{original?, translated?}` |
//! | DELETE | /traducao/{id} | — |
//!
//!
//!
//! # Notes
//!
//! ## MongoDB
//! Translations are schema-flexible documents addressed by ObjectId, and the
//! only query shape is a user-id filter. A document store gives us inserts
//! and partial `$set` updates without any migration story, which is all this
//! service needs.
//!
//! ## Identity
//! Every database call takes an explicit `user_id` parameter. The handlers
//! currently pass a fixed id for mutations, so real multi-user support only
//! changes where that argument comes from, not the shape of the API.
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    routing::{get, post, put},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod database;
pub mod error;
pub mod routes;
pub mod state;
pub mod utils;

use routes::{delete_handler, save_handler, translations_handler, update_handler};
use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.allowed_origin);

    Router::new()
        .route("/salvar", post(save_handler))
        .route("/traduzidas/{user_id}", get(translations_handler))
        .route("/traducao/{id}", put(update_handler).delete(delete_handler))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new().await;

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    let app = router(state);

    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

fn cors_layer(allowed_origin: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    // A wildcard origin cannot carry credentials, so only a concrete
    // configured origin gets them.
    match allowed_origin.parse::<HeaderValue>() {
        Ok(origin) if allowed_origin != "*" => {
            cors.allow_origin(origin).allow_credentials(true)
        }
        _ => cors.allow_origin(Any),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
