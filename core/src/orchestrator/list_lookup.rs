// pricetag/src/orchestrator/list_lookup.rs

//! Product list page: scan a barcode and jump straight to the product.

use crate::capture::{BarcodeDecoder, ScanTrigger};
use crate::core::{MountGuard, ScanContext, StepControl};
use crate::error::{ScanError, ScanResult};
use crate::orchestrator::common_steps::{notify_unresolved, resolve_barcode};
use crate::orchestrator::contexts::ListLookupCtx;
use crate::orchestrator::{report_failure, scan_with, CycleSlot, settle_resolution, ScanOutcome};
use crate::resolver::{ProductResolver, Resolution};
use crate::ui::{Navigator, Notifier, Route};
use crate::workflow::Workflow;
use std::sync::Arc;
use tracing::{debug, info, instrument};

pub struct ListLookupOrchestrator {
  workflow: Workflow<ListLookupCtx, ScanError>,
  ctx: ScanContext<ListLookupCtx>,
  notifier: Arc<dyn Notifier>,
  cycle: CycleSlot,
}

impl ListLookupOrchestrator {
  pub fn new(resolver: Arc<ProductResolver>, navigator: Arc<dyn Navigator>, notifier: Arc<dyn Notifier>) -> Self {
    let mut workflow = Workflow::new(
      "list_lookup",
      &[
        ("resolve", false, None),
        ("navigate", false, None),
      ],
    );

    workflow.on("resolve", resolve_barcode::<ListLookupCtx>(resolver));
    workflow.after("resolve", notify_unresolved::<ListLookupCtx>(notifier.clone()));
    workflow.on("navigate", move |ctx: ScanContext<ListLookupCtx>| {
      let navigator = navigator.clone();
      async move {
        let route = match &ctx.read().resolution {
          Some(Resolution::Resolved(id)) => Some(Route::ProductShow(id.clone())),
          _ => None,
        };
        match route {
          Some(route) if ctx.is_mounted() => {
            info!(%route, "Opening scanned product.");
            navigator.navigate(route);
            Ok::<_, ScanError>(StepControl::Continue)
          }
          _ => Ok(StepControl::Halt),
        }
      }
    });

    Self {
      workflow,
      ctx: ScanContext::default(),
      notifier,
      cycle: CycleSlot::default(),
    }
  }

  pub fn context(&self) -> &ScanContext<ListLookupCtx> {
    &self.ctx
  }

  /// Handle for the navigation layer to call when the list page goes away.
  pub fn mount_guard(&self) -> MountGuard {
    self.ctx.mount_guard()
  }

  /// Runs one lookup cycle for an accepted barcode.
  #[instrument(name = "ListLookupOrchestrator::handle_barcode", skip(self))]
  pub async fn handle_barcode(&self, barcode: &str) -> ScanResult<ScanOutcome> {
    let Some(_cycle) = self.cycle.try_begin() else {
      debug!(%barcode, "Previous scan still in flight, dropping this one.");
      return Ok(ScanOutcome::Busy);
    };

    let started = self.ctx.write_if_mounted(|data| {
      data.scanned_barcode = Some(barcode.to_string());
      data.resolution = None;
    });
    if started.is_none() {
      return Ok(ScanOutcome::Discarded);
    }

    let run = self.workflow.run(self.ctx.clone()).await;

    // Cleared even on failure so the same code can be scanned again.
    let resolution = {
      let mut data = self.ctx.write();
      data.scanned_barcode = None;
      data.resolution.take()
    };

    match run {
      Ok(_) => Ok(settle_resolution(barcode, self.ctx.is_mounted(), resolution, |id| {
        ScanOutcome::Navigated(Route::ProductShow(id))
      })),
      Err(e) => report_failure(&self.ctx, self.notifier.as_ref(), e),
    }
  }

  /// Opens the scanner and handles whatever it returns.
  pub async fn scan<D: BarcodeDecoder>(&self, trigger: &mut ScanTrigger<D>) -> ScanResult<ScanOutcome> {
    scan_with(trigger, self.notifier.as_ref(), move |barcode| async move {
      self.handle_barcode(&barcode).await
    })
    .await
  }
}
