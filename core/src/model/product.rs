// pricetag/src/model/product.rs

use super::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id: RecordId,
  pub name: String,
  pub brand: Option<String>,
  pub description: Option<String>,
  /// Expected to be unique, but the data layer does not enforce it.
  pub barcode: String,
  pub image_url: Option<String>,
  pub insert_date: DateTime<Utc>,
}

/// A validated product form, ready to be inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
  pub name: String,
  pub brand: Option<String>,
  pub description: Option<String>,
  pub barcode: String,
  pub image_url: Option<String>,
}
