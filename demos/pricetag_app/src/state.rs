// demos/pricetag_app/src/state.rs
use crate::config::AppConfig;
use crate::console::ConsoleUi;
use crate::db::PgBackend;
use crate::errors::Result;
use pricetag::{OpenFoodFactsClient, ProductEnricher, ProductResolver};
use sqlx::PgPool;
use std::sync::Arc;

/// Everything the screens share.
#[derive(Clone)]
pub struct AppState {
  pub backend: Arc<PgBackend>,
  pub resolver: Arc<ProductResolver>,
  pub enricher: Arc<ProductEnricher>,
  pub ui: Arc<ConsoleUi>,
  pub config: Arc<AppConfig>,
}

impl AppState {
  pub fn new(config: Arc<AppConfig>, db_pool: PgPool) -> Result<Self> {
    let backend = Arc::new(PgBackend::new(db_pool));
    let catalog = Arc::new(OpenFoodFactsClient::new(&config.catalog)?);
    Ok(Self {
      resolver: Arc::new(ProductResolver::new(backend.clone())),
      enricher: Arc::new(ProductEnricher::new(catalog, config.catalog.locale.clone())),
      backend,
      ui: Arc::new(ConsoleUi),
      config,
    })
  }
}
