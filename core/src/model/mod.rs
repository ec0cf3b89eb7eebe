// pricetag/src/model/mod.rs

//! Records owned by the backend data layer.

pub mod product;
pub mod purchase;
pub mod store;

pub use product::{NewProduct, Product};
pub use purchase::{NewPurchase, Purchase};
pub use store::Store;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity of a backend record.
///
/// The hosted backend hands out ids in whatever shape its tables use; the
/// workflow only compares and forwards them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
  pub fn new(id: impl Into<String>) -> Self {
    RecordId(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for RecordId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for RecordId {
  fn from(id: &str) -> Self {
    RecordId(id.to_string())
  }
}

impl From<String> for RecordId {
  fn from(id: String) -> Self {
    RecordId(id)
  }
}
