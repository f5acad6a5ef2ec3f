//! Core types for Corner Shop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod catalog;
pub mod id;
pub mod mode;
pub mod price;
pub mod transaction;

pub use cart::{Cart, CartLine, LineItem};
pub use catalog::{Catalog, CatalogError, Product};
pub use id::ProductId;
pub use mode::{ModeParseError, PaymentMode};
pub use price::{Currency, Price};
pub use transaction::{TransactionRecord, TransactionStatus};
