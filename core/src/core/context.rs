// pricetag/src/core/context.rs

//! The `Handler<TData, Err>` type for workflow step handlers.

use crate::core::context_data::ScanContext;
use crate::core::control::StepControl;
use std::future::Future;
use std::pin::Pin;

/// An asynchronous step handler.
///
/// Takes a clone of the workflow's `ScanContext<TData>` and resolves to the
/// control signal for the run. Handlers must drop lock guards before awaiting,
/// and should write through `write_if_mounted` so that results arriving after
/// an unmount are discarded.
pub type Handler<TData, Err> = Box<
  dyn Fn(ScanContext<TData>) -> Pin<Box<dyn Future<Output = Result<StepControl, Err>> + Send>> + Send + Sync,
>;
