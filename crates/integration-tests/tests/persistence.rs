//! State file round trips: the shop restarts with the cart, mode, and
//! transaction log it had before.

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;
use std::sync::Arc;

use corner_shop_core::{PaymentMode, Price, ProductId, TransactionRecord, TransactionStatus};
use corner_shop_integration_tests::test_state;
use corner_shop_storefront::payment::{CheckoutSession, StaticGateway};
use corner_shop_storefront::storage::FileStore;

fn temp_state_file() -> PathBuf {
    std::env::temp_dir().join(format!("corner-shop-test-{}.json", uuid::Uuid::new_v4()))
}

fn gateway() -> Arc<StaticGateway> {
    Arc::new(StaticGateway::succeeding(CheckoutSession {
        id: "cs_test_1".to_string(),
        url: "https://pay.example.com/1".to_string(),
    }))
}

#[tokio::test]
async fn test_full_state_survives_restart() {
    let path = temp_state_file();

    {
        let state = test_state(Arc::new(FileStore::open(&path)), gateway());
        let mut cart = state.cart().lock().await;
        cart.add_item(ProductId::new("prod_tutorial_book")).unwrap();
        cart.add_item(ProductId::new("prod_tutorial_coffee")).unwrap();
        cart.set_quantity(&ProductId::new("prod_tutorial_book"), 3);
        drop(cart);

        state.mode().lock().await.select("live").unwrap();
        state.transactions().lock().await.append(TransactionRecord::from_session(
            Some("cs_test_a1b2c3d4e5f6"),
            Price::from_minor_units(2997),
            TransactionStatus::Succeeded,
        ));
    }

    // Fresh store over the same file, as after a process restart.
    let restored = test_state(Arc::new(FileStore::open(&path)), gateway());

    let cart = restored.cart().lock().await;
    let lines = cart.cart().lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].product_id.as_str(), "prod_tutorial_book");
    assert_eq!(lines[0].quantity, 3);
    assert_eq!(lines[1].product_id.as_str(), "prod_tutorial_coffee");
    drop(cart);

    assert_eq!(
        restored.mode().lock().await.current(),
        Some(PaymentMode::Live)
    );

    let transactions = restored.transactions().lock().await;
    assert_eq!(transactions.records().len(), 1);
    assert_eq!(transactions.records()[0].id, "cs_test_a1");
    drop(transactions);

    // The file itself is one JSON object with one entry per store.
    let raw = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    for key in ["cart-state", "payment-mode", "transaction-log"] {
        assert!(parsed.get(key).is_some(), "missing key {key}");
    }

    std::fs::remove_file(&path).ok();
}

#[tokio::test]
async fn test_damaged_state_file_starts_empty() {
    let path = temp_state_file();
    std::fs::write(&path, "{ this is not json").unwrap();

    let state = test_state(Arc::new(FileStore::open(&path)), gateway());
    assert!(state.cart().lock().await.cart().is_empty());
    assert_eq!(state.mode().lock().await.current(), None);
    assert!(state.transactions().lock().await.records().is_empty());

    std::fs::remove_file(&path).ok();
}

#[tokio::test]
async fn test_missing_state_file_starts_empty() {
    let path = temp_state_file();

    let state = test_state(Arc::new(FileStore::open(&path)), gateway());
    assert!(state.cart().lock().await.cart().is_empty());

    // The file appears once something is persisted.
    state
        .cart()
        .lock()
        .await
        .add_item(ProductId::new("prod_tutorial_donation"))
        .unwrap();
    assert!(path.exists());

    std::fs::remove_file(&path).ok();
}
