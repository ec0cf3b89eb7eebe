// pricetag/src/enricher/catalog.rs

//! Open Food Facts lookup client.

use crate::config::CatalogConfig;
use crate::enricher::payload::{CatalogResponse, EnrichmentPayload};
use crate::error::{ScanError, ScanResult};
use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, info, instrument};

/// Anything that can describe a product given its barcode.
///
/// Every failure mode (not found, bad status, unreadable body, network) is
/// reported as `ScanError::EnrichmentUnavailable`.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
  async fn lookup(&self, barcode: &str) -> ScanResult<EnrichmentPayload>;
}

pub struct OpenFoodFactsClient {
  http_client: reqwest::Client,
  base_url: Url,
}

fn unavailable(barcode: &str, reason: impl Into<String>) -> ScanError {
  ScanError::EnrichmentUnavailable {
    barcode: barcode.to_string(),
    reason: reason.into(),
  }
}

impl OpenFoodFactsClient {
  pub fn new(config: &CatalogConfig) -> ScanResult<Self> {
    let http_client = reqwest::Client::builder()
      .user_agent(config.user_agent.as_str())
      .timeout(config.timeout)
      .build()
      .map_err(|e| ScanError::Internal(format!("Failed to build catalog HTTP client: {e}")))?;
    let base_url = Url::parse(&config.base_url)
      .map_err(|e| ScanError::Internal(format!("Invalid catalog base URL '{}': {e}", config.base_url)))?;

    Ok(Self { http_client, base_url })
  }

  /// `{base}/api/v0/product/{barcode}.json`, with the barcode percent-encoded
  /// as a single path segment.
  pub fn product_url(&self, barcode: &str) -> ScanResult<Url> {
    let file_name = format!("{barcode}.json");
    let mut url = self.base_url.clone();
    url
      .path_segments_mut()
      .map_err(|_| unavailable(barcode, "catalog base URL cannot carry a path"))?
      .pop_if_empty()
      .extend(["api", "v0", "product", file_name.as_str()]);
    Ok(url)
  }
}

#[async_trait]
impl CatalogLookup for OpenFoodFactsClient {
  #[instrument(name = "OpenFoodFactsClient::lookup", skip(self), err(Display))]
  async fn lookup(&self, barcode: &str) -> ScanResult<EnrichmentPayload> {
    let url = self.product_url(barcode)?;
    debug!(url = %url, "Querying catalog.");

    let response = self
      .http_client
      .get(url)
      .send()
      .await
      .map_err(|e| unavailable(barcode, format!("network error: {e}")))?;

    let status = response.status();
    if !status.is_success() {
      return Err(unavailable(barcode, format!("HTTP {}", status.as_u16())));
    }

    let body: CatalogResponse = response
      .json()
      .await
      .map_err(|e| unavailable(barcode, format!("unreadable payload: {e}")))?;

    let verbose = body.status_verbose.clone().unwrap_or_else(|| format!("status {}", body.status));
    let payload = body
      .found()
      .ok_or_else(|| unavailable(barcode, format!("not in catalog ({verbose})")))?;

    info!(
      has_name = payload.product_name().is_some(),
      has_brand = payload.brands().is_some(),
      has_image = payload.image_front_url().is_some(),
      "Catalog lookup successful."
    );
    Ok(payload)
  }
}
