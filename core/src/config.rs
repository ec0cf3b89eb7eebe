// pricetag/src/config.rs

use std::time::Duration;

pub const DEFAULT_CATALOG_BASE_URL: &str = "https://world.openfoodfacts.org";
pub const DEFAULT_CATALOG_LOCALE: &str = "en";
pub const DEFAULT_USER_AGENT: &str = concat!("pricetag/", env!("CARGO_PKG_VERSION"));

/// Settings for the open-data catalog lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
  /// Scheme and host of the catalog.
  pub base_url: String,
  /// Language suffix used to pick localized fields (`product_name_<locale>`).
  pub locale: String,
  pub timeout: Duration,
  pub user_agent: String,
}

impl Default for CatalogConfig {
  fn default() -> Self {
    Self {
      base_url: DEFAULT_CATALOG_BASE_URL.to_string(),
      locale: DEFAULT_CATALOG_LOCALE.to_string(),
      timeout: Duration::from_secs(10),
      user_agent: DEFAULT_USER_AGENT.to_string(),
    }
  }
}

/// Settings for driving a capture session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureConfig {
  /// Consecutive empty frames after which a capture session gives up and
  /// closes as if cancelled. `None` waits forever.
  pub max_idle_frames: Option<u32>,
}
