// pricetag/src/workflow/definition.rs

//! Contains the `Workflow<TData, Err>` struct definition and its constructor.

use crate::core::context::Handler;
use crate::core::step::{SkipCondition, StepDef};
use crate::error::ScanError;
use std::collections::HashMap;

/// An ordered list of named steps run against a shared `ScanContext<TData>`.
///
/// Each step carries `on` and `after` handler lists. `Err` is the
/// error type handlers return; it must absorb `ScanError` so wiring problems
/// (a non-optional step with no handlers) can be reported through it.
pub struct Workflow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<ScanError> + Send + Sync + 'static,
{
  pub(crate) name: String,
  pub(crate) steps: Vec<StepDef<TData>>,

  pub(crate) on: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) after: HashMap<String, Vec<Handler<TData, Err>>>,
}

impl<TData, Err> Workflow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<ScanError> + Send + Sync + 'static,
{
  /// Creates a workflow from `(step_name, optional, skip_if)` triples.
  pub fn new(name: impl Into<String>, step_defs: &[(&str, bool, Option<SkipCondition<TData>>)]) -> Self {
    let steps = step_defs
      .iter()
      .map(|(name, optional, skip_cond_opt)| StepDef {
        name: (*name).to_string(),
        optional: *optional,
        skip_if: skip_cond_opt.clone(),
      })
      .collect();

    Self {
      name: name.into(),
      steps,
      on: HashMap::new(),
      after: HashMap::new(),
    }
  }

  /// Panics on an unknown step: a typo in a step name is a wiring bug, not a
  /// runtime condition.
  pub(crate) fn ensure_step_exists(&self, step_name: &str) {
    if !self.steps.iter().any(|s| s.name == step_name) {
      panic!(
        "pricetag setup error: Step '{}' not found in workflow '{}'.",
        step_name, self.name
      );
    }
  }
}
