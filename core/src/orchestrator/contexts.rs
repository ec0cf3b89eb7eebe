// pricetag/src/orchestrator/contexts.rs

//! Workflow state owned by each orchestrator.
//! Handlers receive these wrapped in `ScanContext`.

use crate::enricher::EnrichmentPayload;
use crate::form::{ProductField, ProductForm, PurchaseForm};
use crate::resolver::Resolution;

/// State shared by the orchestrators that resolve a barcode to a product.
pub trait ResolvingContext: Send + Sync + 'static {
  fn scanned_barcode(&self) -> Option<&str>;
  fn resolution(&self) -> Option<&Resolution>;
  fn set_resolution(&mut self, resolution: Resolution);
}

/// Product list page: scan, resolve, jump to the detail view.
#[derive(Debug, Clone, Default)]
pub struct ListLookupCtx {
  pub scanned_barcode: Option<String>,
  pub resolution: Option<Resolution>,
}

/// Product create page: scan, write the barcode, enrich from the catalog.
#[derive(Debug, Clone, Default)]
pub struct ProductCreateCtx {
  pub form: ProductForm,
  pub scanned_barcode: Option<String>,
  pub payload: Option<EnrichmentPayload>,
  /// Fields written by the last enrichment.
  pub enriched_fields: Vec<ProductField>,
}

/// Purchase create page: scan, resolve, fill the product reference.
#[derive(Debug, Clone, Default)]
pub struct PurchaseCreateCtx {
  pub form: PurchaseForm,
  pub scanned_barcode: Option<String>,
  pub resolution: Option<Resolution>,
}

impl ResolvingContext for ListLookupCtx {
  fn scanned_barcode(&self) -> Option<&str> {
    self.scanned_barcode.as_deref()
  }

  fn resolution(&self) -> Option<&Resolution> {
    self.resolution.as_ref()
  }

  fn set_resolution(&mut self, resolution: Resolution) {
    self.resolution = Some(resolution);
  }
}

impl ResolvingContext for PurchaseCreateCtx {
  fn scanned_barcode(&self) -> Option<&str> {
    self.scanned_barcode.as_deref()
  }

  fn resolution(&self) -> Option<&Resolution> {
    self.resolution.as_ref()
  }

  fn set_resolution(&mut self, resolution: Resolution) {
    self.resolution = Some(resolution);
  }
}
