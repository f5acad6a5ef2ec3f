//! Shop front page: mode selector, product grid, cart panel, and the
//! return flow from the hosted checkout.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;

use corner_shop_core::{TransactionRecord, TransactionStatus};

use crate::filters;
use crate::routes::views::{
    CartView, ConnectionView, DebugView, Notice, ProductView, TransactionView,
};
use crate::state::AppState;

/// Query parameters the hosted checkout appends when it sends the
/// customer back, plus the error code our own redirects carry.
#[derive(Debug, Default, Deserialize)]
pub struct ReturnQuery {
    success: Option<String>,
    canceled: Option<String>,
    session_id: Option<String>,
    error: Option<String>,
}

#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    connection: Option<ConnectionView>,
    products: Vec<ProductView>,
    cart: CartView,
    transactions: Vec<TransactionView>,
    debug: Option<DebugView>,
    notice: Option<Notice>,
}

/// GET / - render the shop, or the mode selector when no mode is active.
///
/// This is also the return URL for the hosted checkout. `?success=true`
/// records a transaction and empties the cart; `?canceled=true` keeps the
/// cart and shows a cancellation banner. Both parameters are matched
/// strictly against `"true"`.
pub async fn home(State(state): State<AppState>, Query(query): Query<ReturnQuery>) -> HomeTemplate {
    let mut notice = query
        .error
        .as_deref()
        .and_then(Notice::from_error_code);

    if query.success.as_deref() == Some("true") {
        notice = Some(complete_payment(&state, query.session_id.as_deref()).await);
    } else if query.canceled.as_deref() == Some("true") {
        tracing::info!("hosted checkout canceled, cart kept");
        notice = Some(Notice::warning(
            "Payment canceled. Your cart has been kept.",
        ));
    }

    let mode = state.mode().lock().await.current();
    let connection = mode.map(|mode| ConnectionView::for_mode(mode, &state.key_status(mode)));
    let connected = connection.as_ref().is_some_and(|c| c.connected);
    let debug = mode.and_then(|mode| DebugView::for_mode(mode, &state.config().gateway));

    let products = state.catalog().iter().map(ProductView::from).collect();
    let cart = CartView::from_store(&*state.cart().lock().await, connected);
    let transactions = state
        .transactions()
        .lock()
        .await
        .records()
        .iter()
        .map(TransactionView::from)
        .collect();

    HomeTemplate {
        connection,
        products,
        cart,
        transactions,
        debug,
        notice,
    }
}

/// Record the completed payment and empty the cart.
///
/// The charged amount is the cart total at the moment of return; the cart
/// is cleared only after the total is captured.
async fn complete_payment(state: &AppState, session_id: Option<&str>) -> Notice {
    let amount = {
        let mut cart = state.cart().lock().await;
        let amount = cart.total();
        cart.clear();
        amount
    };

    let record = TransactionRecord::from_session(session_id, amount, TransactionStatus::Succeeded);
    tracing::info!(
        transaction = %record.id,
        amount = amount.minor_units(),
        "payment completed, cart cleared"
    );
    state.transactions().lock().await.append(record);

    Notice::success("Payment completed successfully. Thank you for your order!")
}
