//! Corner Shop Core - Shared domain types.
//!
//! This crate provides the domain model shared across Corner Shop components:
//! - `storefront` - The tutorial storefront binary
//! - `integration-tests` - Black-box tests across crates
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no HTTP
//! clients, no persistence. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Products, catalog, cart, payment mode, and transactions

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
