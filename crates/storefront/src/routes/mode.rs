//! Payment mode selection.

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ModeForm {
    mode: String,
}

/// POST /mode - activate the test or live gateway configuration.
///
/// Only the two enumerated values are accepted; anything else redirects
/// back with an error banner and leaves the previous selection in place.
pub async fn select(State(state): State<AppState>, Form(form): Form<ModeForm>) -> Redirect {
    match state.mode().lock().await.select(&form.mode) {
        Ok(_) => Redirect::to("/"),
        Err(e) => {
            tracing::warn!(error = %e, "mode selection rejected");
            Redirect::to("/?error=invalid-mode")
        }
    }
}
