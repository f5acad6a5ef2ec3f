//! Cart page and cart mutations.
//!
//! Every mutation is a form POST that redirects back to the shop, so a
//! refresh never repeats the operation.

use askama::Template;
use askama_web::WebTemplate;
use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use corner_shop_core::ProductId;

use crate::error::AppError;
use crate::filters;
use crate::routes::views::{CartView, Notice};
use crate::state::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartTemplate {
    cart: CartView,
    notice: Option<Notice>,
}

/// GET /cart - the cart on its own page.
pub async fn show(State(state): State<AppState>) -> CartTemplate {
    let connected = match state.mode().lock().await.current() {
        Some(mode) => state.key_status(mode).key().is_some(),
        None => false,
    };
    let cart = CartView::from_store(&*state.cart().lock().await, connected);
    CartTemplate { cart, notice: None }
}

#[derive(Debug, Deserialize)]
pub struct AddForm {
    product_id: String,
}

/// POST /cart/add - add one unit of a catalog product.
///
/// An id outside the catalog is a 400; the shop UI never produces one.
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<AddForm>,
) -> Result<Redirect, AppError> {
    state
        .cart()
        .lock()
        .await
        .add_item(ProductId::new(form.product_id))?;
    Ok(Redirect::to("/"))
}

#[derive(Debug, Deserialize)]
pub struct UpdateForm {
    product_id: String,
    quantity: i64,
}

/// POST /cart/update - set the quantity of an existing line.
///
/// Zero or negative quantities remove the line; an id with no line in the
/// cart is a no-op. Both follow the same redirect home.
pub async fn update(State(state): State<AppState>, Form(form): Form<UpdateForm>) -> Redirect {
    let quantity = u32::try_from(form.quantity.max(0)).unwrap_or(u32::MAX);
    state
        .cart()
        .lock()
        .await
        .set_quantity(&ProductId::new(form.product_id), quantity);
    Redirect::to("/")
}

#[derive(Debug, Deserialize)]
pub struct RemoveForm {
    product_id: String,
}

/// POST /cart/remove - drop a line entirely.
pub async fn remove(State(state): State<AppState>, Form(form): Form<RemoveForm>) -> Redirect {
    state
        .cart()
        .lock()
        .await
        .remove_item(&ProductId::new(form.product_id));
    Redirect::to("/")
}

/// POST /cart/clear - empty the cart.
pub async fn clear(State(state): State<AppState>) -> Redirect {
    state.cart().lock().await.clear();
    Redirect::to("/")
}
