// pricetag/src/model/store.rs

use super::RecordId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
  pub id: RecordId,
  pub name: String,
  pub image_url: Option<String>,
}
