//! The checkout gateway seam.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use corner_shop_core::{LineItem, PaymentMode};
use serde::{Deserialize, Serialize};

use super::PaymentError;

/// Request to create a hosted checkout session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Cart lines projected into the remote shape.
    pub line_items: Vec<LineItem>,
    /// Active gateway mode; also sent as the `X-Payment-Mode` header.
    pub mode: PaymentMode,
    /// Where the hosted flow returns on success.
    pub success_url: String,
    /// Where the hosted flow returns on cancel.
    pub cancel_url: String,
}

/// A created checkout session: the id and the hosted page to redirect to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Session id (e.g. `cs_test_...`).
    pub id: String,
    /// Hosted checkout URL for the redirect.
    pub url: String,
}

/// Creates checkout sessions on a remote backend.
///
/// One fire-and-forget request per checkout attempt: no retry policy, no
/// cancellation. Concurrency is bounded upstream - the state holds an
/// in-flight guard so at most one attempt runs at a time.
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    /// Create a checkout session for the given line items.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::Remote`] on any transport, status, or
    /// decode failure.
    async fn create_checkout_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError>;
}

// =============================================================================
// StaticGateway
// =============================================================================

/// Gateway double with a canned response, for tests and offline demos.
///
/// Counts calls so tests can assert the single-checkout guard.
pub struct StaticGateway {
    response: Mutex<Result<CheckoutSession, String>>,
    calls: AtomicUsize,
}

impl StaticGateway {
    /// A gateway that always returns the given session.
    #[must_use]
    pub fn succeeding(session: CheckoutSession) -> Self {
        Self {
            response: Mutex::new(Ok(session)),
            calls: AtomicUsize::new(0),
        }
    }

    /// A gateway that always fails with a remote error.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: Mutex::new(Err(message.into())),
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times `create_checkout_session` has been called.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CheckoutGateway for StaticGateway {
    async fn create_checkout_session(
        &self,
        _request: CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let response = self
            .response
            .lock()
            .map_err(|_| PaymentError::Remote("static gateway lock poisoned".to_owned()))?;
        match &*response {
            Ok(session) => Ok(session.clone()),
            Err(message) => Err(PaymentError::Remote(message.clone())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use corner_shop_core::Price;

    fn request() -> CheckoutRequest {
        CheckoutRequest {
            line_items: vec![LineItem {
                name: "Coffee".to_owned(),
                description: "Specialty roast".to_owned(),
                unit_amount: Price::from_minor_units(499),
                quantity: 2,
            }],
            mode: PaymentMode::Test,
            success_url: "https://shop.example.com/?success=true".to_owned(),
            cancel_url: "https://shop.example.com/?canceled=true".to_owned(),
        }
    }

    #[tokio::test]
    async fn test_static_gateway_succeeding() {
        let gateway = StaticGateway::succeeding(CheckoutSession {
            id: "cs_test_123".to_owned(),
            url: "https://pay.example.com/cs_test_123".to_owned(),
        });

        let session = gateway.create_checkout_session(request()).await.unwrap();
        assert_eq!(session.id, "cs_test_123");
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn test_static_gateway_failing() {
        let gateway = StaticGateway::failing("no backend");
        let err = gateway.create_checkout_session(request()).await.unwrap_err();
        assert!(matches!(err, PaymentError::Remote(_)));
    }
}
