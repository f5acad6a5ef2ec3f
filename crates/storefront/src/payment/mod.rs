//! Remote checkout collaborator.
//!
//! The hosted-checkout contract is a design placeholder: the storefront
//! composes the documented request (JSON line items plus a mode header)
//! and redirects to whatever URL comes back, but shipping a backend that
//! answers it is out of scope. Without one, the call fails and surfaces
//! the tutorial's "you need a backend" message.

mod gateway;
mod http;

pub use gateway::{CheckoutGateway, CheckoutRequest, CheckoutSession, StaticGateway};
pub use http::HttpGateway;

use thiserror::Error;

/// Minimum charge the gateway accepts, in minor units (0.50).
pub const MINIMUM_CHARGE_MINOR_UNITS: u64 = 50;

/// Payment-related errors.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// No usable publishable key for the active mode.
    #[error("payment gateway not configured: {0}")]
    Config(String),

    /// The cart total is below the gateway's minimum charge.
    #[error("amount {amount} is below the minimum charge of {minimum} minor units")]
    AmountTooLow {
        /// Requested amount in minor units.
        amount: u64,
        /// Minimum accepted amount in minor units.
        minimum: u64,
    },

    /// The remote call failed: transport, status, or undecodable body.
    /// Surfaced to the user as a transient message; never retried.
    #[error("checkout session request failed: {0}")]
    Remote(String),
}

impl PaymentError {
    /// User-facing message for the transient banner.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Config(_) => "Payment keys are not configured yet.",
            Self::AmountTooLow { .. } => "The minimum order amount is 0.50.",
            Self::Remote(_) => {
                "Could not reach the checkout backend. A backend is required to create payment sessions."
            }
        }
    }
}
