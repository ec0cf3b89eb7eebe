// pricetag/src/workflow/execution.rs

//! Contains `Workflow::run()`, which executes the steps and their handlers in order.

use crate::core::context::Handler;
use crate::core::context_data::ScanContext;
use crate::core::control::{StepControl, WorkflowOutcome};
use crate::error::ScanError;
use crate::workflow::definition::Workflow;
use tracing::{event, instrument, span, Instrument, Level};

impl<TData, Err> Workflow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<ScanError> + Send + Sync + 'static,
{
  /// Executes the workflow against `ctx`.
  ///
  /// Returns the first handler error unchanged. A non-optional step with no
  /// handlers at all yields `ScanError::HandlerMissing` converted into `Err`.
  /// If the context is unmounted between steps the run halts quietly.
  #[instrument(
    name = "Workflow::run",
    skip_all,
    fields(
      workflow = %self.name,
      context_type = %std::any::type_name::<TData>(),
      num_steps = self.steps.len(),
    ),
    err(Display)
  )]
  pub async fn run(&self, ctx: ScanContext<TData>) -> Result<WorkflowOutcome, Err> {
    event!(Level::DEBUG, "Workflow execution starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_name = step_def.name.as_str();

      if !ctx.is_mounted() {
        event!(Level::INFO, step_name, "Context unmounted, halting before step.");
        return Ok(WorkflowOutcome::Halted);
      }

      if let Some(skip_cond_fn) = &step_def.skip_if {
        if skip_cond_fn(ctx.clone()) {
          event!(Level::DEBUG, step_name, "Step skipped due to 'skip_if' condition.");
          continue;
        }
      }

      let phases = [
        ("on", self.on.get(step_name)),
        ("after", self.after.get(step_name)),
      ];

      if phases.iter().all(|(_, handlers)| handlers.map_or(true, |v| v.is_empty())) {
        if step_def.optional {
          event!(Level::DEBUG, step_name, "Optional step has no handlers, skipping.");
          continue;
        }
        event!(Level::ERROR, step_name, "Non-optional step has no handlers.");
        return Err(Err::from(ScanError::HandlerMissing {
          step_name: step_def.name.clone(),
        }));
      }

      let step_span = span!(
        Level::INFO,
        "workflow_step",
        step_name,
        step_index = step_idx,
        optional = step_def.optional
      );

      for (phase, handlers) in phases {
        let Some(handlers) = handlers else { continue };
        let control = run_phase(phase, handlers, &ctx).instrument(step_span.clone()).await?;
        if control == StepControl::Halt {
          event!(Level::INFO, step_name, phase, "Workflow halted by a handler.");
          return Ok(WorkflowOutcome::Halted);
        }
      }
      event!(Level::DEBUG, step_name, "Step finished.");
    }

    event!(Level::DEBUG, "Workflow execution completed.");
    Ok(WorkflowOutcome::Completed)
  }
}

async fn run_phase<TData, Err>(
  phase: &'static str,
  handlers: &[Handler<TData, Err>],
  ctx: &ScanContext<TData>,
) -> Result<StepControl, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + Send + Sync + 'static,
{
  for (handler_idx, handler_fn) in handlers.iter().enumerate() {
    match handler_fn(ctx.clone()).await {
      Ok(StepControl::Continue) => {}
      Ok(StepControl::Halt) => return Ok(StepControl::Halt),
      Err(e) => {
        event!(Level::ERROR, phase, handler_index = handler_idx, error = %e, "Handler failed.");
        return Err(e);
      }
    }
  }
  Ok(StepControl::Continue)
}
