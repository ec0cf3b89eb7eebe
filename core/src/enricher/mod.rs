// pricetag/src/enricher/mod.rs

//! Best-effort product enrichment from the open-data catalog.

pub mod catalog;
pub mod mapping;
pub mod payload;

pub use catalog::{CatalogLookup, OpenFoodFactsClient};
pub use mapping::{apply_payload, planned_updates};
pub use payload::{CatalogResponse, EnrichmentPayload};

use crate::form::{ProductField, ProductForm};
use std::sync::Arc;
use tracing::{instrument, warn};

#[derive(Clone)]
pub struct ProductEnricher {
  catalog: Arc<dyn CatalogLookup>,
  locale: String,
}

impl ProductEnricher {
  pub fn new(catalog: Arc<dyn CatalogLookup>, locale: impl Into<String>) -> Self {
    Self {
      catalog,
      locale: locale.into(),
    }
  }

  pub fn locale(&self) -> &str {
    &self.locale
  }

  /// Looks the barcode up. Any failure is logged and reported as `None`;
  /// enrichment never blocks manual entry.
  #[instrument(name = "ProductEnricher::fetch", skip(self))]
  pub async fn fetch(&self, barcode: &str) -> Option<EnrichmentPayload> {
    match self.catalog.lookup(barcode).await {
      Ok(payload) => Some(payload),
      Err(e) => {
        warn!(error = %e, "No enrichment available.");
        None
      }
    }
  }

  /// Applies the field-mapping policy to `form`.
  pub fn apply(&self, form: &mut ProductForm, payload: &EnrichmentPayload) -> Vec<ProductField> {
    apply_payload(form, payload, &self.locale)
  }
}
