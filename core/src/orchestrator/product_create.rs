// pricetag/src/orchestrator/product_create.rs

//! Product create page: the scanned barcode goes into the form, then whatever
//! the open catalog knows about it fills the remaining fields.

use crate::backend::Backend;
use crate::capture::{BarcodeDecoder, ScanTrigger};
use crate::core::{MountGuard, ScanContext, SkipCondition, StepControl};
use crate::enricher::ProductEnricher;
use crate::error::{ScanError, ScanResult};
use crate::form::{ProductField, ProductForm};
use crate::model::Product;
use crate::orchestrator::contexts::ProductCreateCtx;
use crate::orchestrator::{report_failure, scan_with, CycleSlot, ScanOutcome};
use crate::ui::Notifier;
use crate::workflow::Workflow;
use std::sync::Arc;
use tracing::{debug, info, instrument};

pub struct ProductCreateOrchestrator {
  workflow: Workflow<ProductCreateCtx, ScanError>,
  ctx: ScanContext<ProductCreateCtx>,
  notifier: Arc<dyn Notifier>,
  cycle: CycleSlot,
}

impl ProductCreateOrchestrator {
  pub fn new(enricher: Arc<ProductEnricher>, notifier: Arc<dyn Notifier>) -> Self {
    let no_payload: SkipCondition<ProductCreateCtx> = Arc::new(|ctx: ScanContext<ProductCreateCtx>| {
      let data = ctx.read();
      data.payload.is_none()
    });

    let mut workflow = Workflow::new(
      "product_create",
      &[
        ("write_barcode", false, None),
        ("fetch_enrichment", false, None),
        ("apply_enrichment", false, Some(no_payload)),
      ],
    );

    workflow.on("write_barcode", |ctx: ScanContext<ProductCreateCtx>| async move {
      let written = ctx.write_if_mounted(|data| match data.scanned_barcode.clone() {
        Some(barcode) => {
          // Whatever the previous product's catalog entry filled in does not
          // describe this one.
          for field in std::mem::take(&mut data.enriched_fields) {
            data.form.clear(field);
          }
          data.form.set(ProductField::Barcode, barcode);
          data.payload = None;
          true
        }
        None => false,
      });
      Ok::<_, ScanError>(match written {
        Some(true) => StepControl::Continue,
        _ => StepControl::Halt,
      })
    });

    let fetch_enricher = enricher.clone();
    workflow.on("fetch_enrichment", move |ctx: ScanContext<ProductCreateCtx>| {
      let enricher = fetch_enricher.clone();
      async move {
        let barcode = ctx.read().scanned_barcode.clone();
        let Some(barcode) = barcode else {
          return Ok::<_, ScanError>(StepControl::Halt);
        };

        let payload = enricher.fetch(&barcode).await;

        match ctx.write_if_mounted(|data| data.payload = payload) {
          Some(()) => Ok(StepControl::Continue),
          None => {
            debug!(%barcode, "Screen unmounted during catalog lookup, dropping payload.");
            Ok(StepControl::Halt)
          }
        }
      }
    });

    workflow.on("apply_enrichment", move |ctx: ScanContext<ProductCreateCtx>| {
      let enricher = enricher.clone();
      async move {
        let applied = ctx.write_if_mounted(|data| {
          if let Some(payload) = data.payload.take() {
            data.enriched_fields = enricher.apply(&mut data.form, &payload);
          }
          data.enriched_fields.len()
        });
        match applied {
          Some(count) => {
            info!(fields = count, "Applied catalog data to the product form.");
            Ok::<_, ScanError>(StepControl::Continue)
          }
          None => Ok(StepControl::Halt),
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

  pub fn context(&self) -> &ScanContext<ProductCreateCtx> {
    &self.ctx
  }

  pub fn mount_guard(&self) -> MountGuard {
    self.ctx.mount_guard()
  }

  /// A snapshot of the form as it currently stands.
  pub fn form(&self) -> ProductForm {
    self.ctx.read().form.clone()
  }

  /// Manual edits by the user. Ignored once the screen is gone.
  pub fn edit_form(&self, edit: impl FnOnce(&mut ProductForm)) {
    self.ctx.write_if_mounted(|data| edit(&mut data.form));
  }

  /// Writes `barcode` into the form and enriches the rest from the catalog.
  #[instrument(name = "ProductCreateOrchestrator::handle_barcode", skip(self))]
  pub async fn handle_barcode(&self, barcode: &str) -> ScanResult<ScanOutcome> {
    let Some(_cycle) = self.cycle.try_begin() else {
      debug!(%barcode, "Previous scan still in flight, dropping this one.");
      return Ok(ScanOutcome::Busy);
    };

    let started = self.ctx.write_if_mounted(|data| {
      data.scanned_barcode = Some(barcode.to_string());
    });
    if started.is_none() {
      return Ok(ScanOutcome::Discarded);
    }

    let run = self.workflow.run(self.ctx.clone()).await;

    let fields = {
      let mut data = self.ctx.write();
      data.scanned_barcode = None;
      data.payload = None;
      data.enriched_fields.clone()
    };

    match run {
      Ok(_) if !self.ctx.is_mounted() => Ok(ScanOutcome::Discarded),
      Ok(_) if fields.is_empty() => Ok(ScanOutcome::NotEnriched),
      Ok(_) => Ok(ScanOutcome::Enriched(fields)),
      Err(e) => report_failure(&self.ctx, self.notifier.as_ref(), e),
    }
  }

  pub async fn scan<D: BarcodeDecoder>(&self, trigger: &mut ScanTrigger<D>) -> ScanResult<ScanOutcome> {
    scan_with(trigger, self.notifier.as_ref(), move |barcode| async move {
      self.handle_barcode(&barcode).await
    })
    .await
  }

  /// Validates the form and creates the product.
  #[instrument(name = "ProductCreateOrchestrator::submit", skip_all, err(Display))]
  pub async fn submit(&self, backend: &dyn Backend) -> ScanResult<Product> {
    let new_product = self.form().validate()?;
    let product = backend.create_product(new_product).await.map_err(ScanError::from)?;
    info!(product_id = %product.id, "Product created.");
    Ok(product)
  }
}
