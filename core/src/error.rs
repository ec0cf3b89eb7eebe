// pricetag/src/error.rs
use crate::form::FormErrors;
use crate::model::RecordId;
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Every failure a single scan cycle can produce.
///
/// None of these are fatal: orchestrators turn `NotFound` and `Ambiguous` into
/// notices, swallow `EnrichmentUnavailable` after logging it, and surface
/// `CameraUnavailable` to the user.
#[derive(Debug, Error)]
pub enum ScanError {
  #[error("No product found with barcode: {barcode}")]
  NotFound { barcode: String },

  #[error("Multiple products found with barcode: {barcode} ({})", join_ids(.matches))]
  Ambiguous { barcode: String, matches: Vec<RecordId> },

  #[error("Catalog enrichment unavailable for barcode {barcode}: {reason}")]
  EnrichmentUnavailable { barcode: String, reason: String },

  #[error("Camera unavailable: {0}")]
  CameraUnavailable(String),

  #[error("Data layer error. Source: {source}")]
  Store {
    #[source]
    source: AnyhowError,
  },

  #[error("Cannot save: {0}")]
  InvalidForm(#[from] FormErrors),

  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("Internal pricetag error: {0}")]
  Internal(String),
}

impl ScanError {
  /// `true` for the outcomes a user is told about through a notice.
  pub fn is_user_facing(&self) -> bool {
    matches!(
      self,
      ScanError::NotFound { .. } | ScanError::Ambiguous { .. } | ScanError::CameraUnavailable(_)
    )
  }
}

fn join_ids(ids: &[RecordId]) -> String {
  ids.iter().map(|id| id.as_str()).collect::<Vec<_>>().join(", ")
}

// Data-layer adapters speak anyhow; anything arriving that way is a store failure
// unless it already is one of ours.
impl From<AnyhowError> for ScanError {
  fn from(err: AnyhowError) -> Self {
    match err.downcast::<ScanError>() {
      Ok(scan_err) => scan_err,
      Err(other) => ScanError::Store { source: other },
    }
  }
}

pub type ScanResult<T, E = ScanError> = std::result::Result<T, E>;
