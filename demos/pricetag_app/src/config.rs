// demos/pricetag_app/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use pricetag::{CaptureConfig, CatalogConfig};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub database_url: String,
  pub catalog: CatalogConfig,
  pub capture: CaptureConfig,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let database_url = get_env("DATABASE_URL")?;

    let defaults = CatalogConfig::default();
    let base_url = get_env("CATALOG_BASE_URL").unwrap_or(defaults.base_url);
    let locale = get_env("CATALOG_LOCALE").unwrap_or(defaults.locale);
    let timeout = match get_env("CATALOG_TIMEOUT_SECS") {
      Ok(raw) => Duration::from_secs(
        raw
          .parse::<u64>()
          .map_err(|e| AppError::Config(format!("Invalid CATALOG_TIMEOUT_SECS: {}", e)))?,
      ),
      Err(_) => defaults.timeout,
    };

    let max_idle_frames = match get_env("SCAN_MAX_IDLE_FRAMES") {
      Ok(raw) => Some(
        raw
          .parse::<u32>()
          .map_err(|e| AppError::Config(format!("Invalid SCAN_MAX_IDLE_FRAMES: {}", e)))?,
      ),
      Err(_) => None,
    };

    tracing::info!(catalog = %base_url, %locale, "Application configuration loaded successfully.");

    Ok(Self {
      database_url,
      catalog: CatalogConfig {
        base_url,
        locale,
        timeout,
        user_agent: defaults.user_agent,
      },
      capture: CaptureConfig { max_idle_frames },
    })
  }
}
