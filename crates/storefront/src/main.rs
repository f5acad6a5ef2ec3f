//! Corner Shop - a small hosted-checkout tutorial storefront.
//!
//! This binary serves the shop on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework with plain form posts (no client-side script)
//! - Askama templates for server-side rendering
//! - A JSON file as the durable key-value store for cart, mode, and
//!   transaction state
//! - A hosted-checkout backend reached over HTTP; without one, checkout
//!   fails with an explanatory banner while browsing and carting keep
//!   working
//!
//! Only publishable payment keys are configured here. Secret keys belong
//! on the backend that would answer the checkout-session call.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use corner_shop_storefront::catalog::tutorial_catalog;
use corner_shop_storefront::config::StorefrontConfig;
use corner_shop_storefront::payment::HttpGateway;
use corner_shop_storefront::routes;
use corner_shop_storefront::state::AppState;
use corner_shop_storefront::storage::FileStore;

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "corner_shop_storefront=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Open the durable key-value store; a missing or damaged file starts
    // empty rather than failing startup
    let storage = Arc::new(FileStore::open(&config.state_file));
    tracing::info!(path = %config.state_file.display(), "state file opened");

    // Build application state
    let gateway = Arc::new(HttpGateway::new(&config.gateway));
    let state = AppState::new(config.clone(), Arc::new(tutorial_catalog()), storage, gateway);

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("storefront listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
