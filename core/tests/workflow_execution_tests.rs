// tests/workflow_execution_tests.rs
mod common;

use common::*;
use pricetag::{Handler, ScanContext, ScanError, StepControl, Workflow, WorkflowOutcome};
use serial_test::serial;
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
struct TraceCtx {
  steps_executed: Vec<String>,
  stop_at: Option<String>,
}

fn recording_handler(step_name: &'static str) -> Handler<TraceCtx, ScanError> {
  Box::new(move |ctx: ScanContext<TraceCtx>| {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.steps_executed.push(step_name.to_string());
      if guard.stop_at.as_deref() == Some(step_name) {
        return Ok(StepControl::Halt);
      }
      Ok(StepControl::Continue)
    })
  })
}

fn three_steps() -> Workflow<TraceCtx, ScanError> {
  let mut workflow = Workflow::new("trace", &[("one", false, None), ("two", false, None), ("three", false, None)]);
  workflow.on("one", recording_handler("one"));
  workflow.on("two", recording_handler("two"));
  workflow.on("three", recording_handler("three"));
  workflow
}

#[tokio::test]
#[serial]
async fn test_workflow_runs_steps_in_order() {
  setup_tracing();
  let ctx = ScanContext::new(TraceCtx::default());

  let outcome = three_steps().run(ctx.clone()).await.unwrap();

  assert_eq!(outcome, WorkflowOutcome::Completed);
  assert_eq!(ctx.read().steps_executed, vec!["one", "two", "three"]);
}

#[tokio::test]
#[serial]
async fn test_workflow_halts_when_a_handler_says_so() {
  setup_tracing();
  let ctx = ScanContext::new(TraceCtx {
    stop_at: Some("two".to_string()),
    ..Default::default()
  });

  let outcome = three_steps().run(ctx.clone()).await.unwrap();

  assert_eq!(outcome, WorkflowOutcome::Halted);
  assert_eq!(ctx.read().steps_executed, vec!["one", "two"]);
}

#[tokio::test]
#[serial]
async fn test_after_handlers_run_after_on_handlers() {
  setup_tracing();
  let mut workflow = Workflow::<TraceCtx, ScanError>::new("phases", &[("only", false, None)]);
  workflow.after("only", recording_handler("after"));
  workflow.on("only", recording_handler("on"));

  let ctx = ScanContext::new(TraceCtx::default());
  workflow.run(ctx.clone()).await.unwrap();

  assert_eq!(ctx.read().steps_executed, vec!["on", "after"]);
}

#[tokio::test]
#[serial]
async fn test_handler_error_is_returned_and_stops_the_run() {
  setup_tracing();
  let mut workflow = three_steps();
  workflow.after("one", |_ctx: ScanContext<TraceCtx>| async move {
    Err::<StepControl, _>(ScanError::Internal("boom".to_string()))
  });

  let ctx = ScanContext::new(TraceCtx::default());
  let err = workflow.run(ctx.clone()).await.unwrap_err();

  assert!(matches!(err, ScanError::Internal(ref msg) if msg == "boom"));
  assert_eq!(ctx.read().steps_executed, vec!["one"]);
}

#[tokio::test]
#[serial]
async fn test_skip_condition_and_optional_steps() {
  setup_tracing();
  let mut workflow = Workflow::<TraceCtx, ScanError>::new(
    "skips",
    &[
      ("one", false, None),
      (
        "skipped",
        false,
        Some(Arc::new(|ctx: ScanContext<TraceCtx>| !ctx.read().steps_executed.is_empty())),
      ),
      ("optional_without_handlers", true, None),
      ("three", false, None),
    ],
  );
  workflow.on("one", recording_handler("one"));
  workflow.on("skipped", recording_handler("skipped"));
  workflow.on("three", recording_handler("three"));

  let ctx = ScanContext::new(TraceCtx::default());
  let outcome = workflow.run(ctx.clone()).await.unwrap();

  assert_eq!(outcome, WorkflowOutcome::Completed);
  assert_eq!(ctx.read().steps_executed, vec!["one", "three"]);
}

#[tokio::test]
#[serial]
async fn test_required_step_without_handlers_is_a_wiring_error() {
  setup_tracing();
  let mut workflow = Workflow::<TraceCtx, ScanError>::new("broken", &[("one", false, None), ("two", false, None)]);
  workflow.on("one", recording_handler("one"));

  let err = workflow.run(ScanContext::new(TraceCtx::default())).await.unwrap_err();

  match err {
    ScanError::HandlerMissing { step_name } => assert_eq!(step_name, "two"),
    other => panic!("expected HandlerMissing, got {other:?}"),
  }
}

#[tokio::test]
#[serial]
async fn test_unmounted_context_halts_before_next_step() {
  setup_tracing();
  let mut workflow = three_steps();
  workflow.after("one", |ctx: ScanContext<TraceCtx>| async move {
    ctx.mount_guard().unmount();
    Ok::<_, ScanError>(StepControl::Continue)
  });

  let ctx = ScanContext::new(TraceCtx::default());
  let outcome = workflow.run(ctx.clone()).await.unwrap();

  assert_eq!(outcome, WorkflowOutcome::Halted);
  assert_eq!(ctx.read().steps_executed, vec!["one"]);
}

#[tokio::test]
#[serial]
async fn test_halt_in_on_phase_skips_after_handlers() {
  setup_tracing();
  let mut workflow = three_steps();
  workflow.after("one", recording_handler("after_one"));

  let ctx = ScanContext::new(TraceCtx {
    stop_at: Some("one".to_string()),
    ..Default::default()
  });
  let outcome = workflow.run(ctx.clone()).await.unwrap();

  assert_eq!(outcome, WorkflowOutcome::Halted);
  assert_eq!(ctx.read().steps_executed, vec!["one"]);
}

#[test]
#[should_panic(expected = "Step 'nope' not found")]
fn test_registering_on_unknown_step_panics() {
  let mut workflow = three_steps();
  workflow.on("nope", recording_handler("nope"));
}
