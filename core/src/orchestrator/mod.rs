// pricetag/src/orchestrator/mod.rs

//! The three scan-driven screens, each a workflow run per accepted barcode.

pub mod common_steps;
pub mod contexts;
pub mod list_lookup;
pub mod product_create;
pub mod purchase_create;

pub use contexts::{ListLookupCtx, ProductCreateCtx, PurchaseCreateCtx, ResolvingContext};
pub use list_lookup::ListLookupOrchestrator;
pub use product_create::ProductCreateOrchestrator;
pub use purchase_create::PurchaseCreateOrchestrator;

use crate::capture::{BarcodeDecoder, ScanTrigger};
use crate::core::ScanContext;
use crate::error::{ScanError, ScanResult};
use crate::form::ProductField;
use crate::model::RecordId;
use crate::resolver::Resolution;
use crate::ui::{Notice, Notifier, Route};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info};

/// What one scan cycle did.
#[derive(Debug)]
pub enum ScanOutcome {
  /// List page: the product was found and the user was sent to it.
  Navigated(Route),
  /// Purchase page: the product reference was filled in.
  ProductSelected(RecordId),
  /// Create page: catalog data was applied to these fields.
  Enriched(Vec<ProductField>),
  /// Create page: the barcode was written but the catalog had nothing usable.
  NotEnriched,
  /// The barcode matched no product or several; the user was told.
  Unresolved(ScanError),
  /// The scanner closed without a barcode.
  Cancelled,
  /// The screen went away before the cycle finished; nothing was changed.
  Discarded,
  /// Another barcode was still being handled on this screen; this one was dropped.
  Busy,
}

/// Admits one scan cycle at a time on a screen.
#[derive(Debug, Default)]
pub(crate) struct CycleSlot {
  busy: AtomicBool,
}

impl CycleSlot {
  /// `None` while another cycle holds the slot.
  pub(crate) fn try_begin(&self) -> Option<CycleToken<'_>> {
    self
      .busy
      .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
      .ok()
      .map(|_| CycleToken { slot: self })
  }
}

/// Frees the slot when dropped, including on early return and error paths.
pub(crate) struct CycleToken<'a> {
  slot: &'a CycleSlot,
}

impl Drop for CycleToken<'_> {
  fn drop(&mut self) {
    self.slot.busy.store(false, Ordering::Release);
  }
}

/// Opens `trigger`, waits for one barcode and hands it to `handle`.
///
/// Camera denial is shown to the user and returned as an error.
pub(crate) async fn scan_with<D, F, Fut>(
  trigger: &mut ScanTrigger<D>,
  notifier: &dyn Notifier,
  handle: F,
) -> ScanResult<ScanOutcome>
where
  D: BarcodeDecoder,
  F: FnOnce(String) -> Fut,
  Fut: std::future::Future<Output = ScanResult<ScanOutcome>>,
{
  match trigger.next_barcode().await {
    Ok(Some(barcode)) => handle(barcode).await,
    Ok(None) => {
      info!("Scan closed without a barcode.");
      Ok(ScanOutcome::Cancelled)
    }
    Err(e) => {
      if e.is_user_facing() {
        notifier.notify(Notice::warning(e.to_string()));
      }
      Err(e)
    }
  }
}

/// Turns the resolution left behind by a run into the cycle's outcome.
///
/// `mounted` is sampled after the run; a screen that went away while the
/// cycle was in flight always ends as `Discarded`.
pub(crate) fn settle_resolution(
  barcode: &str,
  mounted: bool,
  resolution: Option<Resolution>,
  on_resolved: impl FnOnce(RecordId) -> ScanOutcome,
) -> ScanOutcome {
  if !mounted {
    return ScanOutcome::Discarded;
  }
  match resolution.map(|r| r.into_result(barcode)) {
    Some(Ok(id)) => on_resolved(id),
    Some(Err(e)) => ScanOutcome::Unresolved(e),
    None => ScanOutcome::Discarded,
  }
}

/// Surfaces a failed cycle to the user (if still on screen) and passes the
/// error on. Unresolved lookups never reach here; they end as outcomes.
pub(crate) fn report_failure<T: Send + Sync + 'static>(
  ctx: &ScanContext<T>,
  notifier: &dyn Notifier,
  err: ScanError,
) -> ScanResult<ScanOutcome> {
  error!(error = %err, "Scan cycle failed.");
  if ctx.is_mounted() {
    notifier.notify(Notice::warning(format!("Lookup failed: {err}")));
  }
  Err(err)
}
