// pricetag/src/orchestrator/purchase_create.rs

//! Purchase create page: scan a product's barcode to pick the product.

use crate::backend::Backend;
use crate::capture::{BarcodeDecoder, ScanTrigger};
use crate::core::{MountGuard, ScanContext, StepControl};
use crate::error::{ScanError, ScanResult};
use crate::form::PurchaseForm;
use crate::model::Purchase;
use crate::orchestrator::common_steps::{notify_unresolved, resolve_barcode};
use crate::orchestrator::contexts::PurchaseCreateCtx;
use crate::orchestrator::{report_failure, scan_with, CycleSlot, settle_resolution, ScanOutcome};
use crate::resolver::{ProductResolver, Resolution};
use crate::ui::Notifier;
use crate::workflow::Workflow;
use std::sync::Arc;
use tracing::{debug, info, instrument};

pub struct PurchaseCreateOrchestrator {
  workflow: Workflow<PurchaseCreateCtx, ScanError>,
  ctx: ScanContext<PurchaseCreateCtx>,
  notifier: Arc<dyn Notifier>,
  cycle: CycleSlot,
}

impl PurchaseCreateOrchestrator {
  pub fn new(resolver: Arc<ProductResolver>, notifier: Arc<dyn Notifier>) -> Self {
    Self::with_form(resolver, notifier, PurchaseForm::default())
  }

  /// Starts from a prefilled form, e.g. with today's date and a default store.
  pub fn with_form(resolver: Arc<ProductResolver>, notifier: Arc<dyn Notifier>, form: PurchaseForm) -> Self {
    let mut workflow = Workflow::new(
      "purchase_create",
      &[
        ("resolve", false, None),
        ("assign_product", false, None),
      ],
    );

    workflow.on("resolve", resolve_barcode::<PurchaseCreateCtx>(resolver));
    workflow.after("resolve", notify_unresolved::<PurchaseCreateCtx>(notifier.clone()));
    workflow.on("assign_product", |ctx: ScanContext<PurchaseCreateCtx>| async move {
      let assigned = ctx.write_if_mounted(|data| match data.resolution.clone() {
        Some(Resolution::Resolved(id)) => {
          data.form.product_id = Some(id.clone());
          Some(id)
        }
        _ => None,
      });
      match assigned.flatten() {
        Some(id) => {
          info!(product_id = %id, "Product selected from scan.");
          Ok::<_, ScanError>(StepControl::Continue)
        }
        None => Ok(StepControl::Halt),
      }
    });

    Self {
      workflow,
      ctx: ScanContext::new(PurchaseCreateCtx {
        form,
        ..Default::default()
      }),
      notifier,
      cycle: CycleSlot::default(),
    }
  }

  pub fn context(&self) -> &ScanContext<PurchaseCreateCtx> {
    &self.ctx
  }

  pub fn mount_guard(&self) -> MountGuard {
    self.ctx.mount_guard()
  }

  pub fn form(&self) -> PurchaseForm {
    self.ctx.read().form.clone()
  }

  pub fn edit_form(&self, edit: impl FnOnce(&mut PurchaseForm)) {
    self.ctx.write_if_mounted(|data| edit(&mut data.form));
  }

  /// Resolves `barcode` and, on a single match, fills in the product.
  #[instrument(name = "PurchaseCreateOrchestrator::handle_barcode", skip(self))]
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

    let resolution = {
      let mut data = self.ctx.write();
      data.scanned_barcode = None;
      data.resolution.take()
    };

    match run {
      Ok(_) => Ok(settle_resolution(
        barcode,
        self.ctx.is_mounted(),
        resolution,
        ScanOutcome::ProductSelected,
      )),
      Err(e) => report_failure(&self.ctx, self.notifier.as_ref(), e),
    }
  }

  pub async fn scan<D: BarcodeDecoder>(&self, trigger: &mut ScanTrigger<D>) -> ScanResult<ScanOutcome> {
    scan_with(trigger, self.notifier.as_ref(), move |barcode| async move {
      self.handle_barcode(&barcode).await
    })
    .await
  }

  /// Validates the form and records the purchase.
  #[instrument(name = "PurchaseCreateOrchestrator::submit", skip_all, err(Display))]
  pub async fn submit(&self, backend: &dyn Backend) -> ScanResult<Purchase> {
    let new_purchase = self.form().validate()?;
    let purchase = backend.create_purchase(new_purchase).await.map_err(ScanError::from)?;
    info!(purchase_id = %purchase.id, product_id = %purchase.product_id, "Purchase recorded.");
    Ok(purchase)
  }
}
