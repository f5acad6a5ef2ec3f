//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /              - Shop page (also the hosted-checkout return URL)
//! GET  /health        - Health check
//!
//! # Mode
//! POST /mode          - Select the test or live gateway configuration
//!
//! # Cart
//! GET  /cart          - Cart page
//! POST /cart/add      - Add one unit of a product
//! POST /cart/update   - Set line quantity (0 removes)
//! POST /cart/remove   - Remove a line
//! POST /cart/clear    - Empty the cart
//!
//! # Checkout
//! POST /checkout      - Create a hosted session and redirect to it
//!
//! # Transactions
//! GET  /transactions  - Past checkout outcomes, newest first
//! ```

pub mod cart;
pub mod checkout;
pub mod home;
pub mod mode;
pub mod transactions;
pub mod views;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Shop page and checkout return flow
        .route("/", get(home::home))
        // Mode selection
        .route("/mode", post(mode::select))
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout kickoff
        .route("/checkout", post(checkout::create))
        // Transaction history
        .route("/transactions", get(transactions::index))
}
