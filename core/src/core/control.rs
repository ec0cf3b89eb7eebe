// pricetag/src/core/control.rs

//! Signals for controlling workflow flow and the outcome of a workflow run.

/// Returned by every step handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepControl {
  /// Keep going with the current step and the ones after it.
  Continue,
  /// Stop immediately; no further handlers run.
  Halt,
}

/// Outcome of a full workflow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowOutcome {
  /// Every non-skipped step ran.
  Completed,
  /// A handler returned `StepControl::Halt`, or the owning screen was unmounted.
  Halted,
}
