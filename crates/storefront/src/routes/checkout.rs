//! Checkout kickoff: validate, create a session, redirect to it.

use axum::extract::State;
use axum::response::Redirect;

use crate::config::KeyStatus;
use crate::payment::{CheckoutRequest, MINIMUM_CHARGE_MINOR_UNITS, PaymentError};
use crate::state::AppState;

/// POST /checkout - create a hosted checkout session and redirect to it.
///
/// The preconditions are checked in order: an active mode, a configured
/// publishable key for it, a non-empty cart, and a total at or above the
/// gateway minimum. Any failure redirects home with an error code the
/// page turns into a banner; nothing here returns an error status.
pub async fn create(State(state): State<AppState>) -> Redirect {
    let Some(mode) = state.mode().lock().await.current() else {
        return Redirect::to("/?error=no-mode");
    };

    if state.key_status(mode) == KeyStatus::Unconfigured {
        tracing::warn!(%mode, "checkout attempted without a configured key");
        return Redirect::to("/?error=unconfigured");
    }

    let (line_items, total) = {
        let cart = state.cart().lock().await;
        (cart.line_items(), cart.total())
    };

    if line_items.is_empty() {
        return Redirect::to("/?error=empty-cart");
    }

    if total.minor_units() < MINIMUM_CHARGE_MINOR_UNITS {
        let err = PaymentError::AmountTooLow {
            amount: total.minor_units(),
            minimum: MINIMUM_CHARGE_MINOR_UNITS,
        };
        tracing::warn!(error = %err, "checkout rejected");
        return Redirect::to("/?error=amount-too-low");
    }

    // One attempt at a time; the slot frees itself on every return path.
    let Some(_slot) = state.try_begin_checkout() else {
        tracing::warn!("checkout already in flight, rejecting");
        return Redirect::to("/?error=checkout-busy");
    };

    let gateway = &state.config().gateway;
    let request = CheckoutRequest {
        line_items,
        mode,
        success_url: gateway.success_url.clone(),
        cancel_url: gateway.cancel_url.clone(),
    };

    match state.gateway().create_checkout_session(request).await {
        Ok(session) => {
            tracing::info!(session_id = %session.id, %mode, "redirecting to hosted checkout");
            Redirect::to(&session.url)
        }
        Err(e) => {
            tracing::warn!(error = %e, "checkout session creation failed");
            Redirect::to("/?error=checkout-remote")
        }
    }
}
