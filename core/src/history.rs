// pricetag/src/history.rs

//! Price evolution of one product across stores.

use crate::backend::Backend;
use crate::error::{ScanError, ScanResult};
use crate::model::{Purchase, RecordId, Store};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Shown when a purchase points at a store that no longer exists.
pub const UNKNOWN_STORE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
  pub purchase_id: RecordId,
  pub store_name: String,
  pub price: f64,
  pub purchase_date: DateTime<Utc>,
  pub is_promotion: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PriceHistory {
  /// Oldest first.
  pub points: Vec<PricePoint>,
}

impl PriceHistory {
  /// Builds the history from raw purchases and the known stores.
  pub fn build(mut purchases: Vec<Purchase>, stores: &[Store]) -> Self {
    let names: HashMap<&RecordId, &str> = stores.iter().map(|s| (&s.id, s.name.as_str())).collect();
    // Stable: purchases on the same instant keep backend order.
    purchases.sort_by_key(|p| p.purchase_date);
    let points = purchases
      .into_iter()
      .map(|p| PricePoint {
        store_name: names.get(&p.store_id).copied().unwrap_or(UNKNOWN_STORE).to_string(),
        purchase_id: p.id,
        price: p.price,
        purchase_date: p.purchase_date,
        is_promotion: p.is_promotion,
      })
      .collect();
    Self { points }
  }

  pub fn lowest(&self) -> Option<&PricePoint> {
    self.points.iter().min_by(|a, b| a.price.total_cmp(&b.price))
  }

  pub fn latest(&self) -> Option<&PricePoint> {
    self.points.last()
  }

  pub fn is_empty(&self) -> bool {
    self.points.is_empty()
  }
}

#[instrument(skip_all, fields(product_id = %product_id), err(Display))]
pub async fn price_history(backend: &dyn Backend, product_id: &RecordId) -> ScanResult<PriceHistory> {
  let purchases = backend.purchases_for_product(product_id).await.map_err(ScanError::from)?;
  let stores = backend.stores().await.map_err(ScanError::from)?;
  debug!(purchases = purchases.len(), stores = stores.len(), "Building price history.");
  Ok(PriceHistory::build(purchases, &stores))
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  fn purchase(id: &str, store: &str, price: f64, day: u32) -> Purchase {
    Purchase {
      id: RecordId::from(id),
      product_id: RecordId::from("p"),
      store_id: RecordId::from(store),
      price,
      purchase_date: Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
      is_promotion: false,
    }
  }

  #[test]
  fn sorted_oldest_first_with_store_names() {
    let stores = vec![Store {
      id: RecordId::from("s1"),
      name: "Corner Shop".to_string(),
      image_url: None,
    }];
    let history = PriceHistory::build(
      vec![purchase("b", "s1", 2.10, 9), purchase("a", "gone", 1.80, 2)],
      &stores,
    );
    let ids: Vec<&str> = history.points.iter().map(|p| p.purchase_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(history.points[0].store_name, UNKNOWN_STORE);
    assert_eq!(history.points[1].store_name, "Corner Shop");
    assert_eq!(history.lowest().map(|p| p.price), Some(1.80));
    assert_eq!(history.latest().map(|p| p.price), Some(2.10));
  }

  #[test]
  fn empty_history_has_no_extremes() {
    let history = PriceHistory::build(Vec::new(), &[]);
    assert!(history.is_empty());
    assert!(history.lowest().is_none());
  }
}
