//! Integration tests for Corner Shop.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p corner-shop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `shop_flow` - Cart and mode operations through the HTTP surface
//! - `checkout` - Checkout preconditions and the hosted-session redirect
//! - `persistence` - State file round trips across restarts
//!
//! The suite drives the real router with an in-process `tower` service
//! and a canned gateway, so no network or backend is needed.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use axum::response::Response;

use corner_shop_storefront::catalog::tutorial_catalog;
use corner_shop_storefront::config::{GatewayConfig, StorefrontConfig};
use corner_shop_storefront::payment::CheckoutGateway;
use corner_shop_storefront::routes;
use corner_shop_storefront::state::AppState;
use corner_shop_storefront::storage::KeyValueStore;

/// A configuration with a usable test key and no live key.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().expect("valid ip"),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        state_file: "unused.json".into(),
        gateway: GatewayConfig {
            api_url: "http://localhost:3000".to_string(),
            test_public_key: Some("pk_test_51Hxyz9AbCdEfGhIjKlMn".to_string()),
            live_public_key: None,
            success_url: "http://localhost:3000/?success=true".to_string(),
            cancel_url: "http://localhost:3000/?canceled=true".to_string(),
        },
    }
}

/// Application state over the tutorial catalog with injected storage and
/// gateway doubles.
#[must_use]
pub fn test_state(storage: Arc<dyn KeyValueStore>, gateway: Arc<dyn CheckoutGateway>) -> AppState {
    AppState::new(test_config(), Arc::new(tutorial_catalog()), storage, gateway)
}

/// The full storefront router as an in-process service.
#[must_use]
pub fn app(state: AppState) -> Router {
    Router::new().merge(routes::routes()).with_state(state)
}

/// Build a GET request.
#[must_use]
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

/// Build a form POST request with an urlencoded body.
#[must_use]
pub fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .expect("request builds")
}

/// The `Location` header of a redirect response.
#[must_use]
pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}
