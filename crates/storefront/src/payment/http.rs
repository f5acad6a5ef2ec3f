//! HTTP implementation of the checkout gateway.
//!
//! Posts the documented JSON body to the configured backend endpoint with
//! the mode in a custom header, and decodes `{id, url}` from the reply.

use async_trait::async_trait;
use corner_shop_core::LineItem;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::gateway::{CheckoutGateway, CheckoutRequest, CheckoutSession};
use super::PaymentError;
use crate::config::{ENDPOINT_CREATE_CHECKOUT_SESSION, GatewayConfig};

/// Header carrying the active payment mode to the backend.
const MODE_HEADER: &str = "X-Payment-Mode";

/// Checkout gateway that talks to a real backend over HTTP.
pub struct HttpGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpGateway {
    /// Build a gateway from the gateway configuration.
    #[must_use]
    pub fn new(config: &GatewayConfig) -> Self {
        let endpoint = config
            .api_endpoint(ENDPOINT_CREATE_CHECKOUT_SESSION)
            .unwrap_or_else(|_| unreachable!("create-checkout-session is a known endpoint"));
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl CheckoutGateway for HttpGateway {
    #[instrument(skip(self, request), fields(mode = %request.mode))]
    async fn create_checkout_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let body = SessionBody::from(&request);

        let response = self
            .client
            .post(&self.endpoint)
            .header(MODE_HEADER, request.mode.as_str())
            .json(&body)
            .send()
            .await
            .map_err(|e| PaymentError::Remote(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %text.chars().take(200).collect::<String>(),
                "checkout backend returned non-success status"
            );
            return Err(PaymentError::Remote(format!("HTTP {status}")));
        }

        let session: SessionReply = response
            .json()
            .await
            .map_err(|e| PaymentError::Remote(format!("undecodable session reply: {e}")))?;

        Ok(CheckoutSession {
            id: session.id,
            url: session.url,
        })
    }
}

// =============================================================================
// Wire types
// =============================================================================

/// POST body for the create-checkout-session call.
#[derive(Debug, Serialize)]
struct SessionBody {
    items: Vec<WireLineItem>,
    mode: String,
    success_url: String,
    cancel_url: String,
}

impl From<&CheckoutRequest> for SessionBody {
    fn from(request: &CheckoutRequest) -> Self {
        Self {
            items: request.line_items.iter().map(WireLineItem::from).collect(),
            mode: request.mode.as_str().to_owned(),
            success_url: request.success_url.clone(),
            cancel_url: request.cancel_url.clone(),
        }
    }
}

/// One line item in the SDK's nested `price_data` shape.
#[derive(Debug, Serialize)]
struct WireLineItem {
    price_data: WirePriceData,
    quantity: u32,
}

#[derive(Debug, Serialize)]
struct WirePriceData {
    currency: String,
    product_data: WireProductData,
    unit_amount: u64,
}

#[derive(Debug, Serialize)]
struct WireProductData {
    name: String,
    description: String,
}

impl From<&LineItem> for WireLineItem {
    fn from(item: &LineItem) -> Self {
        Self {
            price_data: WirePriceData {
                currency: corner_shop_core::Currency::default().code().to_owned(),
                product_data: WireProductData {
                    name: item.name.clone(),
                    description: item.description.clone(),
                },
                unit_amount: item.unit_amount.minor_units(),
            },
            quantity: item.quantity,
        }
    }
}

/// Reply from the backend: the created session.
#[derive(Debug, Deserialize)]
struct SessionReply {
    id: String,
    url: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use corner_shop_core::{PaymentMode, Price};

    #[test]
    fn test_session_body_wire_shape() {
        let request = CheckoutRequest {
            line_items: vec![LineItem {
                name: "Digital Book".to_owned(),
                description: "Complete guide to web programming".to_owned(),
                unit_amount: Price::from_minor_units(1999),
                quantity: 2,
            }],
            mode: PaymentMode::Test,
            success_url: "https://shop.example.com/?success=true".to_owned(),
            cancel_url: "https://shop.example.com/?canceled=true".to_owned(),
        };

        let body = SessionBody::from(&request);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["mode"], "test");
        assert_eq!(json["items"][0]["quantity"], 2);
        assert_eq!(json["items"][0]["price_data"]["unit_amount"], 1999);
        assert_eq!(json["items"][0]["price_data"]["currency"], "eur");
        assert_eq!(
            json["items"][0]["price_data"]["product_data"]["name"],
            "Digital Book"
        );
    }

    #[test]
    fn test_session_reply_decodes() {
        let reply: SessionReply =
            serde_json::from_str(r#"{"id":"cs_test_abc","url":"https://pay.example.com/abc"}"#)
                .unwrap();
        assert_eq!(reply.id, "cs_test_abc");
        assert_eq!(reply.url, "https://pay.example.com/abc");
    }
}
