// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every fake.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use pricetag::{
  Backend, BarcodeDecoder, CatalogLookup, EnrichmentPayload, Frame, NewProduct, NewPurchase, Navigator, Notice,
  Notifier, Product, Purchase, RecordId, Route, ScanError, ScanResult, Store,
};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

// --- Helper for Tracing Setup ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

/// Runs while a fake call is "in flight", e.g. to unmount the screen.
pub type InFlightHook = Box<dyn Fn() + Send + Sync>;

// --- Records ---
pub fn product(id: &str, barcode: &str, name: &str) -> Product {
  Product {
    id: RecordId::from(id),
    name: name.to_string(),
    brand: None,
    description: None,
    barcode: barcode.to_string(),
    image_url: None,
    insert_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
  }
}

pub fn store(id: &str, name: &str) -> Store {
  Store {
    id: RecordId::from(id),
    name: name.to_string(),
    image_url: None,
  }
}

pub fn payload(json: serde_json::Value) -> EnrichmentPayload {
  serde_json::from_value(json).expect("test payload must deserialize")
}

// --- In-memory backend ---
#[derive(Default)]
pub struct InMemoryBackend {
  pub products: Mutex<Vec<Product>>,
  pub stores: Mutex<Vec<Store>>,
  pub purchases: Mutex<Vec<Purchase>>,
  pub fail_with: Mutex<Option<String>>,
  pub barcode_queries: AtomicUsize,
  pub on_barcode_query: Mutex<Option<InFlightHook>>,
  /// Per-barcode latency, to keep a lookup in flight.
  pub query_delays: Mutex<HashMap<String, Duration>>,
}

impl InMemoryBackend {
  pub fn with_products(products: Vec<Product>) -> Arc<Self> {
    let backend = Self::default();
    *backend.products.lock() = products;
    Arc::new(backend)
  }

  pub fn queries(&self) -> usize {
    self.barcode_queries.load(Ordering::SeqCst)
  }

  pub fn delay(&self, barcode: &str, delay: Duration) {
    self.query_delays.lock().insert(barcode.to_string(), delay);
  }

  fn check_failure(&self) -> anyhow::Result<()> {
    match self.fail_with.lock().as_ref() {
      Some(msg) => Err(anyhow::anyhow!(msg.clone())),
      None => Ok(()),
    }
  }
}

#[async_trait]
impl Backend for InMemoryBackend {
  async fn products_by_barcode(&self, barcode: &str) -> anyhow::Result<Vec<Product>> {
    self.barcode_queries.fetch_add(1, Ordering::SeqCst);
    if let Some(hook) = self.on_barcode_query.lock().as_ref() {
      hook();
    }
    let delay = self.query_delays.lock().get(barcode).copied();
    if let Some(delay) = delay {
      tokio::time::sleep(delay).await;
    }
    self.check_failure()?;
    Ok(
      self
        .products
        .lock()
        .iter()
        .filter(|p| p.barcode == barcode)
        .cloned()
        .collect(),
    )
  }

  async fn product(&self, id: &RecordId) -> anyhow::Result<Option<Product>> {
    self.check_failure()?;
    Ok(self.products.lock().iter().find(|p| &p.id == id).cloned())
  }

  async fn stores(&self) -> anyhow::Result<Vec<Store>> {
    self.check_failure()?;
    Ok(self.stores.lock().clone())
  }

  async fn purchases_for_product(&self, product_id: &RecordId) -> anyhow::Result<Vec<Purchase>> {
    self.check_failure()?;
    Ok(
      self
        .purchases
        .lock()
        .iter()
        .filter(|p| &p.product_id == product_id)
        .cloned()
        .collect(),
    )
  }

  async fn create_product(&self, new: NewProduct) -> anyhow::Result<Product> {
    self.check_failure()?;
    let mut products = self.products.lock();
    let product = Product {
      id: RecordId::from(format!("p{}", products.len() + 1)),
      name: new.name,
      brand: new.brand,
      description: new.description,
      barcode: new.barcode,
      image_url: new.image_url,
      insert_date: Utc::now(),
    };
    products.push(product.clone());
    Ok(product)
  }

  async fn create_purchase(&self, new: NewPurchase) -> anyhow::Result<Purchase> {
    self.check_failure()?;
    let mut purchases = self.purchases.lock();
    let purchase = Purchase {
      id: RecordId::from(format!("u{}", purchases.len() + 1)),
      product_id: new.product_id,
      store_id: new.store_id,
      price: new.price,
      purchase_date: new.purchase_date,
      is_promotion: new.is_promotion,
    };
    purchases.push(purchase.clone());
    Ok(purchase)
  }
}

// --- Fake catalog ---
#[derive(Default)]
pub struct FakeCatalog {
  pub entries: Mutex<HashMap<String, EnrichmentPayload>>,
  pub lookups: AtomicUsize,
  pub on_lookup: Mutex<Option<InFlightHook>>,
}

impl FakeCatalog {
  pub fn with_entry(barcode: &str, entry: EnrichmentPayload) -> Arc<Self> {
    let catalog = Self::default();
    catalog.entries.lock().insert(barcode.to_string(), entry);
    Arc::new(catalog)
  }

  pub fn lookups(&self) -> usize {
    self.lookups.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl CatalogLookup for FakeCatalog {
  async fn lookup(&self, barcode: &str) -> ScanResult<EnrichmentPayload> {
    self.lookups.fetch_add(1, Ordering::SeqCst);
    if let Some(hook) = self.on_lookup.lock().as_ref() {
      hook();
    }
    self
      .entries
      .lock()
      .get(barcode)
      .cloned()
      .ok_or_else(|| ScanError::EnrichmentUnavailable {
        barcode: barcode.to_string(),
        reason: "product not found".to_string(),
      })
  }
}

// --- Scripted decoder ---
/// Plays back a fixed list of frames, then reports `Frame::Ended`.
#[derive(Default)]
pub struct ScriptedDecoder {
  pub frames: VecDeque<Frame>,
  pub deny: bool,
  pub acquires: usize,
  pub releases: usize,
  pub frames_read: usize,
}

impl ScriptedDecoder {
  pub fn new(frames: Vec<Frame>) -> Self {
    Self {
      frames: frames.into(),
      ..Default::default()
    }
  }

  pub fn decoding(barcodes: &[&str]) -> Self {
    Self::new(barcodes.iter().map(|b| Frame::Decoded(b.to_string())).collect())
  }

  pub fn denied() -> Self {
    Self {
      deny: true,
      ..Default::default()
    }
  }
}

#[async_trait]
impl BarcodeDecoder for ScriptedDecoder {
  async fn acquire(&mut self) -> ScanResult<()> {
    if self.deny {
      return Err(ScanError::CameraUnavailable("permission denied".to_string()));
    }
    self.acquires += 1;
    Ok(())
  }

  async fn decode_frame(&mut self) -> Frame {
    self.frames_read += 1;
    self.frames.pop_front().unwrap_or(Frame::Ended)
  }

  fn release(&mut self) {
    self.releases += 1;
  }
}

// --- Recording UI ---
#[derive(Default)]
pub struct RecordingUi {
  pub routes: Mutex<Vec<Route>>,
  pub notices: Mutex<Vec<Notice>>,
}

impl RecordingUi {
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }

  pub fn routes(&self) -> Vec<Route> {
    self.routes.lock().clone()
  }

  pub fn notices(&self) -> Vec<Notice> {
    self.notices.lock().clone()
  }
}

impl Navigator for RecordingUi {
  fn navigate(&self, route: Route) {
    self.routes.lock().push(route);
  }
}

impl Notifier for RecordingUi {
  fn notify(&self, notice: Notice) {
    self.notices.lock().push(notice);
  }
}
