// pricetag/src/backend.rs

//! The hosted data layer as seen by the workflow.

use crate::model::{NewProduct, NewPurchase, Product, Purchase, RecordId, Store};
use async_trait::async_trait;

/// Generic record access over products, stores and purchases.
///
/// Filters are exact-match only. Implementations report failures as
/// `anyhow::Error`; callers convert them into `ScanError::Store`.
#[async_trait]
pub trait Backend: Send + Sync {
  /// Products whose barcode equals `barcode`. May return several rows: the
  /// backend does not enforce barcode uniqueness.
  async fn products_by_barcode(&self, barcode: &str) -> anyhow::Result<Vec<Product>>;

  async fn product(&self, id: &RecordId) -> anyhow::Result<Option<Product>>;

  async fn stores(&self) -> anyhow::Result<Vec<Store>>;

  async fn purchases_for_product(&self, product_id: &RecordId) -> anyhow::Result<Vec<Purchase>>;

  async fn create_product(&self, product: NewProduct) -> anyhow::Result<Product>;

  async fn create_purchase(&self, purchase: NewPurchase) -> anyhow::Result<Purchase>;
}
