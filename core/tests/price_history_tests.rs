// tests/price_history_tests.rs
mod common;

use chrono::{Duration, Utc};
use common::*;
use pricetag::{history::UNKNOWN_STORE, price_history, Purchase, RecordId, ScanError};
use serial_test::serial;

fn purchase(id: &str, product: &str, store: &str, price: f64, days_ago: i64, is_promotion: bool) -> Purchase {
  Purchase {
    id: RecordId::from(id),
    product_id: RecordId::from(product),
    store_id: RecordId::from(store),
    price,
    purchase_date: Utc::now() - Duration::days(days_ago),
    is_promotion,
  }
}

#[tokio::test]
#[serial]
async fn test_history_lists_one_products_purchases_oldest_first() {
  setup_tracing();
  let backend = InMemoryBackend::with_products(vec![product("p1", "0017", "Butter")]);
  *backend.stores.lock() = vec![store("s1", "Market"), store("s2", "Corner Shop")];
  *backend.purchases.lock() = vec![
    purchase("u1", "p1", "s1", 2.49, 1, false),
    purchase("u2", "p1", "s2", 1.99, 30, true),
    purchase("u3", "other", "s1", 0.50, 5, false),
    purchase("u4", "p1", "closed", 2.19, 10, false),
  ];

  let history = price_history(&*backend, &RecordId::from("p1")).await.unwrap();

  let stores: Vec<&str> = history.points.iter().map(|p| p.store_name.as_str()).collect();
  assert_eq!(stores, vec!["Corner Shop", UNKNOWN_STORE, "Market"]);
  let lowest = history.lowest().unwrap();
  assert_eq!(lowest.price, 1.99);
  assert!(lowest.is_promotion);
  assert_eq!(history.latest().map(|p| p.purchase_id.as_str()), Some("u1"));
}

#[tokio::test]
#[serial]
async fn test_history_surfaces_data_layer_failures() {
  setup_tracing();
  let backend = InMemoryBackend::with_products(Vec::new());
  *backend.fail_with.lock() = Some("timeout".to_string());

  let err = price_history(&*backend, &RecordId::from("p1")).await.unwrap_err();

  assert!(matches!(err, ScanError::Store { .. }));
}
