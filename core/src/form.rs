// pricetag/src/form.rs

//! Create-screen form state and validation.
//!
//! Forms hold raw, possibly-missing values while the user (or a workflow)
//! fills them in. Validation checks each field independently and yields a
//! single `FieldResult` per field; the record is only built when every field
//! passed.

use crate::model::{NewProduct, NewPurchase, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
  #[error("{field} is required")]
  Required { field: &'static str },

  #[error("{field} must not be negative")]
  Negative { field: &'static str },

  #[error("{field} is invalid: {reason}")]
  Invalid { field: &'static str, reason: String },
}

impl FieldError {
  pub fn field(&self) -> &'static str {
    match self {
      FieldError::Required { field } | FieldError::Negative { field } | FieldError::Invalid { field, .. } => field,
    }
  }
}

pub type FieldResult<T> = Result<T, FieldError>;

/// All field errors of one validation pass, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("form has {} invalid field(s)", .0.len())]
pub struct FormErrors(pub Vec<FieldError>);

impl FormErrors {
  pub fn for_field(&self, field: &str) -> Option<&FieldError> {
    self.0.iter().find(|e| e.field() == field)
  }
}

/// Blank input counts as missing.
fn present(value: &Option<String>) -> Option<String> {
  value
    .as_deref()
    .map(str::trim)
    .filter(|v| !v.is_empty())
    .map(str::to_string)
}

fn required(field: &'static str, value: &Option<String>) -> FieldResult<String> {
  present(value).ok_or(FieldError::Required { field })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductField {
  Name,
  Brand,
  Description,
  Barcode,
  ImageUrl,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductForm {
  pub name: Option<String>,
  pub brand: Option<String>,
  pub description: Option<String>,
  pub barcode: Option<String>,
  pub image_url: Option<String>,
}

impl ProductForm {
  pub fn get(&self, field: ProductField) -> Option<&str> {
    self.slot(field).as_deref()
  }

  /// Overwrites one field.
  pub fn set(&mut self, field: ProductField, value: impl Into<String>) {
    *self.slot_mut(field) = Some(value.into());
  }

  pub fn clear(&mut self, field: ProductField) {
    *self.slot_mut(field) = None;
  }

  fn slot(&self, field: ProductField) -> &Option<String> {
    match field {
      ProductField::Name => &self.name,
      ProductField::Brand => &self.brand,
      ProductField::Description => &self.description,
      ProductField::Barcode => &self.barcode,
      ProductField::ImageUrl => &self.image_url,
    }
  }

  fn slot_mut(&mut self, field: ProductField) -> &mut Option<String> {
    match field {
      ProductField::Name => &mut self.name,
      ProductField::Brand => &mut self.brand,
      ProductField::Description => &mut self.description,
      ProductField::Barcode => &mut self.barcode,
      ProductField::ImageUrl => &mut self.image_url,
    }
  }

  pub fn validate_name(&self) -> FieldResult<String> {
    required("name", &self.name)
  }

  pub fn validate_barcode(&self) -> FieldResult<String> {
    // Manual entry without a scan is allowed.
    Ok(present(&self.barcode).unwrap_or_default())
  }

  pub fn validate(&self) -> Result<NewProduct, FormErrors> {
    let name = self.validate_name();
    let barcode = self.validate_barcode();
    match (name, barcode) {
      (Ok(name), Ok(barcode)) => Ok(NewProduct {
        name,
        brand: present(&self.brand),
        description: present(&self.description),
        barcode,
        image_url: present(&self.image_url),
      }),
      (name, barcode) => Err(FormErrors(
        [name.err(), barcode.err()].into_iter().flatten().collect(),
      )),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseForm {
  pub product_id: Option<RecordId>,
  pub store_id: Option<RecordId>,
  /// Raw price input as typed.
  pub price: Option<String>,
  pub purchase_date: Option<DateTime<Utc>>,
  pub is_promotion: bool,
}

impl PurchaseForm {
  pub fn validate_product(&self) -> FieldResult<RecordId> {
    self
      .product_id
      .clone()
      .ok_or(FieldError::Required { field: "product_id" })
  }

  pub fn validate_store(&self) -> FieldResult<RecordId> {
    self.store_id.clone().ok_or(FieldError::Required { field: "store_id" })
  }

  pub fn validate_price(&self) -> FieldResult<f64> {
    let raw = required("price", &self.price)?;
    let price: f64 = raw.parse().map_err(|e: std::num::ParseFloatError| FieldError::Invalid {
      field: "price",
      reason: e.to_string(),
    })?;
    if !price.is_finite() {
      return Err(FieldError::Invalid {
        field: "price",
        reason: "not a finite number".to_string(),
      });
    }
    if price < 0.0 {
      return Err(FieldError::Negative { field: "price" });
    }
    Ok(price)
  }

  pub fn validate_purchase_date(&self) -> FieldResult<DateTime<Utc>> {
    self
      .purchase_date
      .ok_or(FieldError::Required { field: "purchase_date" })
  }

  pub fn validate(&self) -> Result<NewPurchase, FormErrors> {
    match (
      self.validate_product(),
      self.validate_store(),
      self.validate_price(),
      self.validate_purchase_date(),
    ) {
      (Ok(product_id), Ok(store_id), Ok(price), Ok(purchase_date)) => Ok(NewPurchase {
        product_id,
        store_id,
        price,
        purchase_date,
        is_promotion: self.is_promotion,
      }),
      (product, store, price, date) => Err(FormErrors(
        [product.err(), store.err(), price.err(), date.err()]
          .into_iter()
          .flatten()
          .collect(),
      )),
    }
  }
}
