// pricetag/src/resolver.rs

//! Barcode -> product resolution.

use crate::backend::Backend;
use crate::error::{ScanError, ScanResult};
use crate::model::{Product, RecordId};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// The three ways a barcode lookup can come out. Callers must handle all three.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
  NotFound,
  Resolved(RecordId),
  /// Two or more products share the barcode. Never narrowed down automatically.
  Ambiguous(Vec<RecordId>),
}

impl Resolution {
  /// Classifies `candidates` against `barcode`.
  ///
  /// Only exact, case-sensitive barcode matches count; anything else the data
  /// layer returned is ignored.
  pub fn classify(barcode: &str, candidates: &[Product]) -> Self {
    let mut matches: Vec<RecordId> = candidates
      .iter()
      .filter(|p| p.barcode == barcode)
      .map(|p| p.id.clone())
      .collect();

    match matches.len() {
      0 => Resolution::NotFound,
      1 => Resolution::Resolved(matches.remove(0)),
      _ => Resolution::Ambiguous(matches),
    }
  }

  /// The resolved product id, treating the other outcomes as errors.
  pub fn into_result(self, barcode: &str) -> ScanResult<RecordId> {
    match self {
      Resolution::Resolved(id) => Ok(id),
      Resolution::NotFound => Err(ScanError::NotFound {
        barcode: barcode.to_string(),
      }),
      Resolution::Ambiguous(matches) => Err(ScanError::Ambiguous {
        barcode: barcode.to_string(),
        matches,
      }),
    }
  }
}

#[derive(Clone)]
pub struct ProductResolver {
  backend: Arc<dyn Backend>,
}

impl ProductResolver {
  pub fn new(backend: Arc<dyn Backend>) -> Self {
    Self { backend }
  }

  #[instrument(name = "ProductResolver::resolve", skip(self), err(Display))]
  pub async fn resolve(&self, barcode: &str) -> ScanResult<Resolution> {
    let candidates = self.backend.products_by_barcode(barcode).await.map_err(ScanError::from)?;
    let resolution = Resolution::classify(barcode, &candidates);
    match &resolution {
      Resolution::NotFound => info!("No product matches barcode."),
      Resolution::Resolved(id) => info!(product_id = %id, "Barcode resolved."),
      Resolution::Ambiguous(ids) => warn!(count = ids.len(), "Barcode shared by several products."),
    }
    Ok(resolution)
  }
}
