// pricetag/src/workflow/hooks.rs

//! Registration of `on` and `after` handlers for workflow steps.

use crate::core::context::Handler;
use crate::core::context_data::ScanContext;
use crate::core::control::StepControl;
use crate::error::ScanError;
use crate::workflow::definition::Workflow;
use std::future::Future;

#[derive(Clone, Copy)]
enum Phase {
  On,
  After,
}

impl<TData, Err> Workflow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<ScanError> + Send + Sync + 'static,
{
  /// Registers the main handler of a step.
  ///
  /// The handler may return any error type convertible into the workflow's `Err`.
  pub fn on<F, UserErr>(&mut self, step_name: &str, handler_fn: impl Fn(ScanContext<TData>) -> F + Send + Sync + 'static)
  where
    F: Future<Output = Result<StepControl, UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    self.register(Phase::On, step_name, handler_fn);
  }

  /// Registers a handler that runs after the step's `on` handlers, e.g. to
  /// react to what they left in the context.
  pub fn after<F, UserErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(ScanContext<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<StepControl, UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    self.register(Phase::After, step_name, handler_fn);
  }

  fn register<F, UserErr>(
    &mut self,
    phase: Phase,
    step_name: &str,
    handler_fn: impl Fn(ScanContext<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<StepControl, UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    let final_handler: Handler<TData, Err> = Box::new(move |ctx| {
      let user_fut = handler_fn(ctx);
      Box::pin(async move { user_fut.await.map_err(Into::into) })
    });
    let table = match phase {
      Phase::On => &mut self.on,
      Phase::After => &mut self.after,
    };
    table.entry(step_name.to_string()).or_default().push(final_handler);
  }
}
