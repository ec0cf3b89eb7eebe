// pricetag/src/model/purchase.rs

use super::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
  pub id: RecordId,
  pub product_id: RecordId,
  pub store_id: RecordId,
  /// Never negative; enforced when the purchase form is validated.
  pub price: f64,
  pub purchase_date: DateTime<Utc>,
  pub is_promotion: bool,
}

/// A validated purchase form, ready to be inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPurchase {
  pub product_id: RecordId,
  pub store_id: RecordId,
  pub price: f64,
  pub purchase_date: DateTime<Utc>,
  pub is_promotion: bool,
}
