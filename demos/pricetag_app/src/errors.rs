// demos/pricetag_app/src/errors.rs

use pricetag::ScanError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Scan Workflow Error: {source}")]
  Scan {
    #[from]
    source: ScanError,
  },

  #[error("Output Error: {0}")]
  Output(#[from] serde_json::Error),
}

impl AppError {
  /// Process exit code for this error.
  pub fn exit_code(&self) -> i32 {
    match self {
      AppError::Config(_) => 78,
      AppError::Sqlx(_) => 69,
      AppError::Scan { source } if source.is_user_facing() => 1,
      AppError::Scan { .. } | AppError::Output(_) => 70,
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
