//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOP_BASE_URL` - Public URL for the storefront (return URLs derive from it)
//!
//! ## Optional
//! - `SHOP_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOP_PORT` - Listen port (default: 3000)
//! - `SHOP_STATE_FILE` - Path of the key-value state file (default: corner-shop-state.json)
//! - `SHOP_API_URL` - Base URL of the checkout backend (default: `SHOP_BASE_URL`)
//! - `PAYMENT_TEST_PUBLIC_KEY` - Publishable key for test mode
//! - `PAYMENT_LIVE_PUBLIC_KEY` - Publishable key for live mode
//!
//! Publishable keys are the only credentials the demo knows about; secret
//! keys belong on a backend and are deliberately not modeled. A missing or
//! placeholder key leaves the corresponding mode unconfigured: the shop
//! still browses and carts, but checkout stays disabled.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use corner_shop_core::PaymentMode;
use thiserror::Error;

/// Blocklist of common placeholder patterns (case-insensitive).
///
/// A key matching one of these is treated as unconfigured rather than sent
/// to the gateway, so deploy-time template values never look "connected".
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "your_",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "configure",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Named backend endpoints the storefront can compose URLs for.
pub const ENDPOINT_CREATE_CHECKOUT_SESSION: &str = "create-checkout-session";
pub const ENDPOINT_TRANSACTIONS: &str = "transactions";
pub const ENDPOINT_WEBHOOKS: &str = "webhooks";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Error returned for endpoint names the config does not know.
#[derive(Debug, Clone, Error)]
#[error("unknown endpoint: {0}")]
pub struct UnknownEndpoint(pub String);

/// Resolution of a publishable key for a mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyStatus {
    /// A usable publishable key.
    Configured(String),
    /// The key is absent or still a placeholder; checkout is blocked.
    Unconfigured,
}

impl KeyStatus {
    /// The key, if configured.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Configured(key) => Some(key),
            Self::Unconfigured => None,
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Path of the durable key-value state file
    pub state_file: PathBuf,
    /// Payment gateway configuration
    pub gateway: GatewayConfig,
}

/// Payment gateway configuration: per-mode publishable keys and the
/// backend the checkout-session call goes to.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the backend that creates checkout sessions
    pub api_url: String,
    /// Publishable key for test mode, if set
    pub test_public_key: Option<String>,
    /// Publishable key for live mode, if set
    pub live_public_key: Option<String>,
    /// URL the hosted checkout redirects to on success
    pub success_url: String,
    /// URL the hosted checkout redirects to on cancel
    pub cancel_url: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("SHOP_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOP_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("SHOP_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOP_PORT".to_string(), e.to_string()))?;
        let base_url = get_required_env("SHOP_BASE_URL")?;
        url::Url::parse(&base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("SHOP_BASE_URL".to_string(), e.to_string()))?;
        let state_file =
            PathBuf::from(get_env_or_default("SHOP_STATE_FILE", "corner-shop-state.json"));

        let gateway = GatewayConfig::from_env(&base_url)?;

        Ok(Self {
            host,
            port,
            base_url,
            state_file,
            gateway,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl GatewayConfig {
    fn from_env(base_url: &str) -> Result<Self, ConfigError> {
        let api_url = get_env_or_default("SHOP_API_URL", base_url);
        url::Url::parse(&api_url)
            .map_err(|e| ConfigError::InvalidEnvVar("SHOP_API_URL".to_string(), e.to_string()))?;

        Ok(Self {
            api_url,
            test_public_key: get_optional_env("PAYMENT_TEST_PUBLIC_KEY"),
            live_public_key: get_optional_env("PAYMENT_LIVE_PUBLIC_KEY"),
            success_url: format!("{base_url}/?success=true"),
            cancel_url: format!("{base_url}/?canceled=true"),
        })
    }

    /// Resolve the publishable key for a mode.
    ///
    /// Returns [`KeyStatus::Unconfigured`] when the variable is unset or
    /// matches a placeholder pattern. Only publishable keys exist here, so
    /// this can never leak a secret credential.
    #[must_use]
    pub fn key_for(&self, mode: PaymentMode) -> KeyStatus {
        let raw = match mode {
            PaymentMode::Test => self.test_public_key.as_deref(),
            PaymentMode::Live => self.live_public_key.as_deref(),
        };
        match raw {
            Some(key) if !key.is_empty() && !is_placeholder(key) => {
                KeyStatus::Configured(key.to_owned())
            }
            _ => KeyStatus::Unconfigured,
        }
    }

    /// Compose the full URL for a named backend endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownEndpoint`] for names not in the endpoint table.
    pub fn api_endpoint(&self, name: &str) -> Result<String, UnknownEndpoint> {
        let path = match name {
            ENDPOINT_CREATE_CHECKOUT_SESSION => "/api/create-checkout-session",
            ENDPOINT_TRANSACTIONS => "/api/transactions",
            ENDPOINT_WEBHOOKS => "/api/webhooks/payment",
            other => return Err(UnknownEndpoint(other.to_owned())),
        };
        Ok(format!("{}{path}", self.api_url.trim_end_matches('/')))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Whether a key value looks like a deploy-template placeholder.
fn is_placeholder(value: &str) -> bool {
    let lower = value.to_lowercase();
    PLACEHOLDER_PATTERNS
        .iter()
        .any(|pattern| lower.contains(pattern))
}
