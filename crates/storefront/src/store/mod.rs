//! Owned, storage-backed state stores.
//!
//! Each piece of durable state is an explicit store object that owns its
//! in-memory value and persists through an injected
//! [`KeyValueStore`](crate::storage::KeyValueStore) after every mutation.
//!
//! Shared failure policy: a read or deserialize failure at startup resets
//! to the empty state with a warning, and a persist failure keeps the
//! in-memory mutation and logs - nothing in here is fatal to the process.

pub mod cart;
pub mod mode;
pub mod transactions;

pub use cart::{CartStore, UnknownProduct};
pub use mode::ModeStore;
pub use transactions::TransactionLog;
