// pricetag/src/enricher/payload.rs

//! Shapes of the catalog lookup response.
//!
//! Everything here is untrusted: fields may be missing, `null`, blank, or of
//! an unexpected JSON type. Unexpected types read as absent rather than
//! failing the whole payload.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Status value the catalog uses for "product found".
pub const STATUS_FOUND: i64 = 1;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CatalogResponse {
  #[serde(default)]
  pub status: i64,
  #[serde(default, deserialize_with = "lenient_text")]
  pub status_verbose: Option<String>,
  #[serde(default)]
  pub product: Option<EnrichmentPayload>,
}

impl CatalogResponse {
  /// The product payload, if the catalog reported it as found.
  pub fn found(self) -> Option<EnrichmentPayload> {
    if self.status == STATUS_FOUND {
      self.product
    } else {
      None
    }
  }
}

/// A partial product description from the catalog.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct EnrichmentPayload {
  /// Generic (non-localized) product name.
  #[serde(default, deserialize_with = "lenient_text")]
  pub product_name: Option<String>,
  /// Generic short description.
  #[serde(default, deserialize_with = "lenient_text")]
  pub generic_name: Option<String>,
  #[serde(default, deserialize_with = "lenient_text")]
  pub brands: Option<String>,
  #[serde(default, deserialize_with = "lenient_text")]
  pub image_front_url: Option<String>,
  #[serde(default, deserialize_with = "lenient_text")]
  pub categories: Option<String>,
  /// Every other key, including the locale-suffixed variants
  /// (`product_name_fr`, `generic_name_en`, ...).
  #[serde(flatten)]
  pub extra: HashMap<String, Value>,
}

impl EnrichmentPayload {
  /// `<field>_<locale>` as non-blank text, if present.
  pub fn localized(&self, field: &str, locale: &str) -> Option<&str> {
    self
      .extra
      .get(&format!("{field}_{locale}"))
      .and_then(Value::as_str)
      .and_then(non_blank)
  }

  pub fn product_name(&self) -> Option<&str> {
    self.product_name.as_deref().and_then(non_blank)
  }

  pub fn generic_name(&self) -> Option<&str> {
    self.generic_name.as_deref().and_then(non_blank)
  }

  pub fn brands(&self) -> Option<&str> {
    self.brands.as_deref().and_then(non_blank)
  }

  pub fn image_front_url(&self) -> Option<&str> {
    self.image_front_url.as_deref().and_then(non_blank)
  }

  pub fn categories(&self) -> Option<&str> {
    self.categories.as_deref().and_then(non_blank)
  }
}

fn non_blank(s: &str) -> Option<&str> {
  let trimmed = s.trim();
  if trimmed.is_empty() {
    None
  } else {
    Some(trimmed)
  }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<Value>::deserialize(deserializer)?;
  Ok(match value {
    Some(Value::String(s)) => Some(s),
    _ => None,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn found_requires_status_one() {
    let resp: CatalogResponse = serde_json::from_value(json!({
      "status": 0,
      "status_verbose": "product not found",
      "product": { "product_name": "ghost" }
    }))
    .unwrap();
    assert!(resp.found().is_none());
  }

  #[test]
  fn wrong_types_and_blanks_read_as_absent() {
    let resp: CatalogResponse = serde_json::from_value(json!({
      "status": 1,
      "product": {
        "product_name": 42,
        "brands": "   ",
        "generic_name": null,
        "product_name_de": "Milch",
        "nutriments": { "energy": 270 }
      }
    }))
    .unwrap();
    let payload = resp.found().unwrap();
    assert_eq!(payload.product_name(), None);
    assert_eq!(payload.brands(), None);
    assert_eq!(payload.generic_name(), None);
    assert_eq!(payload.localized("product_name", "de"), Some("Milch"));
    assert_eq!(payload.localized("product_name", "fr"), None);
  }

  #[test]
  fn missing_status_is_not_found() {
    let resp: CatalogResponse = serde_json::from_value(json!({})).unwrap();
    assert_eq!(resp.status, 0);
    assert!(resp.found().is_none());
  }
}
