// demos/pricetag_app/src/screens.rs

//! One function per screen. Each owns its orchestrator for the length of the
//! command and unmounts it on the way out.

use crate::console::LineDecoder;
use crate::errors::Result;
use crate::state::AppState;
use chrono::Utc;
use pricetag::{
  price_history, Backend, ListLookupOrchestrator, Navigator, Notice, Notifier, ProductCreateOrchestrator,
  PurchaseCreateOrchestrator, PurchaseForm, RecordId, Route, ScanError, ScanOutcome, ScanTrigger,
};
use tracing::{debug, info, warn};

fn trigger(state: &AppState) -> ScanTrigger<LineDecoder> {
  ScanTrigger::with_config(LineDecoder::stdin(), state.config.capture)
}

/// Product list: keep scanning until the feed ends.
pub async fn lookup(state: &AppState) -> Result<()> {
  let page = ListLookupOrchestrator::new(state.resolver.clone(), state.ui.clone(), state.ui.clone());
  let mut trigger = trigger(state);

  let result: Result<()> = loop {
    match page.scan(&mut trigger).await {
      Ok(ScanOutcome::Cancelled) => break Ok(()),
      Ok(outcome) => debug!(?outcome, "Scan handled."),
      Err(e @ ScanError::CameraUnavailable(_)) => break Err(e.into()),
      // Already shown to the user; the next scan may well succeed.
      Err(e) => warn!(error = %e, "Scan failed."),
    }
  };
  page.mount_guard().unmount();
  result
}

/// Product create: scan, enrich, save.
pub async fn create_product(state: &AppState, name: Option<String>, dry_run: bool) -> Result<()> {
  let page = ProductCreateOrchestrator::new(state.enricher.clone(), state.ui.clone());

  match page.scan(&mut trigger(state)).await? {
    ScanOutcome::Cancelled => {
      info!("No barcode scanned, nothing to create.");
      return Ok(());
    }
    ScanOutcome::Enriched(fields) => {
      state.ui.notify(Notice::info(format!("Filled {} field(s) from the catalog.", fields.len())));
    }
    outcome => debug!(?outcome, "Barcode written without catalog data."),
  }

  if let Some(name) = name {
    page.edit_form(|form| {
      form.name.get_or_insert(name);
    });
  }
  println!("{}", serde_json::to_string_pretty(&page.form())?);

  if dry_run {
    page.mount_guard().unmount();
    return Ok(());
  }

  let product = page.submit(&*state.backend).await?;
  page.mount_guard().unmount();
  state.ui.notify(Notice::info(format!("Created product {}", product.name)));
  state.ui.navigate(Route::ProductShow(product.id));
  Ok(())
}

/// Purchase create: scan the product, then record the purchase.
pub async fn create_purchase(state: &AppState, store: String, price: String, promotion: bool) -> Result<()> {
  let form = PurchaseForm {
    store_id: Some(RecordId::from(store)),
    price: Some(price),
    purchase_date: Some(Utc::now()),
    is_promotion: promotion,
    ..Default::default()
  };
  let page = PurchaseCreateOrchestrator::with_form(state.resolver.clone(), state.ui.clone(), form);

  let outcome = page.scan(&mut trigger(state)).await?;
  let result = match outcome {
    ScanOutcome::ProductSelected(product_id) => {
      let purchase = page.submit(&*state.backend).await?;
      println!("{}", serde_json::to_string_pretty(&purchase)?);
      state.ui.notify(Notice::info(format!("Purchase recorded for product {product_id}")));
      Ok(())
    }
    outcome => {
      info!(?outcome, "No product selected, nothing saved.");
      Ok(())
    }
  };
  page.mount_guard().unmount();
  result
}

/// Price evolution of one product.
pub async fn history(state: &AppState, product_id: String, json: bool) -> Result<()> {
  let product_id = RecordId::from(product_id);
  let backend: &dyn Backend = &*state.backend;

  let Some(product) = backend.product(&product_id).await.map_err(ScanError::from)? else {
    state.ui.notify(Notice::warning(format!("No product with id {product_id}")));
    return Ok(());
  };
  let history = price_history(backend, &product_id).await?;

  if json {
    println!("{}", serde_json::to_string_pretty(&history)?);
    return Ok(());
  }

  println!("{} ({})", product.name, product.barcode);
  if history.is_empty() {
    println!("  no purchases yet");
  }
  for point in &history.points {
    println!(
      "  {}  {:>8.2}  {}{}",
      point.purchase_date.format("%Y-%m-%d"),
      point.price,
      point.store_name,
      if point.is_promotion { "  (promotion)" } else { "" }
    );
  }
  if let Some(lowest) = history.lowest() {
    println!("  lowest: {:.2} at {}", lowest.price, lowest.store_name);
  }
  Ok(())
}
