//! View models reconciling store state and catalog into renderable data.
//!
//! Templates get pre-formatted strings; all money formatting happens here
//! so the HTML stays dumb. The builders are pure functions of the stores.

use corner_shop_core::{Currency, PaymentMode, Product, TransactionRecord};

use crate::config::{ENDPOINT_CREATE_CHECKOUT_SESSION, GatewayConfig, KeyStatus};
use crate::payment::PaymentError;
use crate::store::CartStore;

/// How many characters of the publishable key the debug panel shows.
const KEY_PREVIEW_LEN: usize = 20;

/// A transient banner message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// CSS class: "success", "info", "warning" or "error".
    pub kind: &'static str,
    /// Message text.
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: "success",
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: "info",
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: "warning",
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: "error",
            text: text.into(),
        }
    }

    /// Map a redirect error code back to a banner.
    ///
    /// Mutating handlers redirect to `/?error=<code>`; unknown codes are
    /// ignored rather than echoed to the page.
    #[must_use]
    pub fn from_error_code(code: &str) -> Option<Self> {
        match code {
            "invalid-mode" => Some(Self::error("Invalid mode. Choose \"test\" or \"live\".")),
            "no-mode" => Some(Self::info("Select a payment mode first.")),
            "unconfigured" => Some(Self::error(
                PaymentError::Config(String::new()).user_message(),
            )),
            "empty-cart" => Some(Self::warning("The cart is empty.")),
            "amount-too-low" => Some(Self::warning(
                PaymentError::AmountTooLow {
                    amount: 0,
                    minimum: crate::payment::MINIMUM_CHARGE_MINOR_UNITS,
                }
                .user_message(),
            )),
            "checkout-busy" => Some(Self::info("A checkout is already in progress.")),
            "checkout-remote" => Some(Self::error(
                PaymentError::Remote(String::new()).user_message(),
            )),
            _ => None,
        }
    }
}

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        let mut price = product.price.display(Currency::default());
        if product.allows_custom_amount {
            price.push('+');
        }
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price,
            category: product.category.clone(),
        }
    }
}

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: String,
    pub item_count: u32,
    pub is_empty: bool,
    /// Enabled only when the gateway connection is active AND the cart
    /// is non-empty.
    pub checkout_enabled: bool,
}

impl CartView {
    /// Build the view from the cart store.
    #[must_use]
    pub fn from_store(store: &CartStore, connected: bool) -> Self {
        let currency = Currency::default();
        let lines: Vec<CartLineView> = store
            .cart()
            .lines()
            .iter()
            .filter_map(|line| {
                store.catalog().get(&line.product_id).map(|product| CartLineView {
                    product_id: product.id.to_string(),
                    name: product.name.clone(),
                    quantity: line.quantity,
                    unit_price: product.price.display(currency),
                    line_total: product
                        .price
                        .saturating_mul(u64::from(line.quantity))
                        .display(currency),
                })
            })
            .collect();

        let is_empty = lines.is_empty();
        Self {
            lines,
            total: store.total().display(currency),
            item_count: store.cart().item_count(),
            is_empty,
            checkout_enabled: connected && !is_empty,
        }
    }
}

/// Gateway connection status shown in the header.
#[derive(Clone)]
pub struct ConnectionView {
    pub connected: bool,
    pub message: String,
    pub mode_label: String,
}

impl ConnectionView {
    /// Build the connection view for the active mode.
    #[must_use]
    pub fn for_mode(mode: PaymentMode, key_status: &KeyStatus) -> Self {
        let mode_label = match mode {
            PaymentMode::Test => "Test mode",
            PaymentMode::Live => "Live mode",
        };
        match key_status {
            KeyStatus::Configured(_) => {
                let message = match mode {
                    PaymentMode::Test => {
                        "Connected. Test mode active - use card 4242 4242 4242 4242.".to_owned()
                    }
                    PaymentMode::Live => {
                        "Connected. Live mode active - real payments would be processed."
                            .to_owned()
                    }
                };
                Self {
                    connected: true,
                    message,
                    mode_label: mode_label.to_owned(),
                }
            }
            KeyStatus::Unconfigured => Self {
                connected: false,
                message: format!(
                    "Publishable key for {mode} mode is not configured. Checkout is disabled."
                ),
                mode_label: mode_label.to_owned(),
            },
        }
    }
}

/// Debug panel data, shown in test mode only.
#[derive(Clone)]
pub struct DebugView {
    pub public_key_preview: String,
    pub session_endpoint: String,
}

impl DebugView {
    /// Build the debug panel for test mode; `None` for live mode.
    #[must_use]
    pub fn for_mode(mode: PaymentMode, gateway: &GatewayConfig) -> Option<Self> {
        if mode != PaymentMode::Test {
            return None;
        }
        let public_key_preview = gateway.key_for(mode).key().map_or_else(
            || "not configured".to_owned(),
            |key| format!("{}...", key.chars().take(KEY_PREVIEW_LEN).collect::<String>()),
        );
        let session_endpoint = gateway
            .api_endpoint(ENDPOINT_CREATE_CHECKOUT_SESSION)
            .unwrap_or_else(|_| unreachable!("create-checkout-session is a known endpoint"));
        Some(Self {
            public_key_preview,
            session_endpoint,
        })
    }
}

/// Transaction display data for templates.
#[derive(Clone)]
pub struct TransactionView {
    pub id: String,
    pub date: String,
    pub amount: String,
    pub status_label: String,
    pub status_class: &'static str,
}

impl From<&TransactionRecord> for TransactionView {
    fn from(record: &TransactionRecord) -> Self {
        Self {
            id: record.id.clone(),
            date: record.date.format("%Y-%m-%d %H:%M UTC").to_string(),
            amount: record.amount.display(Currency::default()),
            status_label: record.status.label().to_owned(),
            status_class: match record.status {
                corner_shop_core::TransactionStatus::Succeeded => "success",
                corner_shop_core::TransactionStatus::Canceled => "warning",
            },
        }
    }
}
