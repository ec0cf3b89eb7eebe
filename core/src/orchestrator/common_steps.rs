// pricetag/src/orchestrator/common_steps.rs

//! Step handlers shared by more than one orchestrator.

use crate::core::{Handler, ScanContext, StepControl};
use crate::error::ScanError;
use crate::orchestrator::contexts::ResolvingContext;
use crate::resolver::{ProductResolver, Resolution};
use crate::ui::{Notice, Notifier};
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves the scanned barcode and stores the classification in the context.
///
/// Halts when there is nothing to resolve or when the screen was unmounted
/// while the query was in flight.
pub fn resolve_barcode<T: ResolvingContext>(resolver: Arc<ProductResolver>) -> Handler<T, ScanError> {
  Box::new(move |ctx: ScanContext<T>| {
    let resolver = resolver.clone();
    Box::pin(async move {
      let barcode = { ctx.read().scanned_barcode().map(str::to_string) };
      let Some(barcode) = barcode else {
        debug!("No scanned barcode to resolve.");
        return Ok(StepControl::Halt);
      };

      let resolution = resolver.resolve(&barcode).await?;

      match ctx.write_if_mounted(|data| data.set_resolution(resolution)) {
        Some(()) => Ok(StepControl::Continue),
        None => {
          debug!(%barcode, "Screen unmounted during lookup, dropping result.");
          Ok(StepControl::Halt)
        }
      }
    })
  })
}

/// The notice shown for a resolution that did not single out a product.
pub fn rejection_notice(barcode: &str, resolution: &Resolution) -> Option<Notice> {
  match resolution.clone().into_result(barcode) {
    Ok(_) => None,
    Err(e) => Some(Notice::warning(e.to_string())),
  }
}

/// Tells the user about `NotFound` / `Ambiguous` and halts; lets `Resolved` through.
pub fn notify_unresolved<T: ResolvingContext>(notifier: Arc<dyn Notifier>) -> Handler<T, ScanError> {
  Box::new(move |ctx: ScanContext<T>| {
    let notifier = notifier.clone();
    Box::pin(async move {
      let notice = {
        let data = ctx.read();
        let notice = match (data.scanned_barcode(), data.resolution()) {
          (Some(barcode), Some(resolution)) => rejection_notice(barcode, resolution),
          _ => None,
        };
        notice
      };
      match notice {
        None => Ok(StepControl::Continue),
        Some(notice) => {
          if ctx.is_mounted() {
            warn!(message = %notice.message, "Scan did not resolve to a single product.");
            notifier.notify(notice);
          }
          Ok(StepControl::Halt)
        }
      }
    })
  })
}
