//! Past-transactions page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use crate::filters;
use crate::routes::views::TransactionView;
use crate::state::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "transactions.html")]
pub struct TransactionsTemplate {
    transactions: Vec<TransactionView>,
}

/// GET /transactions - the full transaction list, newest first.
pub async fn index(State(state): State<AppState>) -> TransactionsTemplate {
    let transactions = state
        .transactions()
        .lock()
        .await
        .records()
        .iter()
        .map(TransactionView::from)
        .collect();
    TransactionsTemplate { transactions }
}
