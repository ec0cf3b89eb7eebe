pub mod context;
pub mod context_data;
pub mod control;
pub mod step;

pub use context::Handler;
pub use context_data::{MountGuard, ScanContext};
pub use control::{StepControl, WorkflowOutcome};
pub use step::{SkipCondition, StepDef};
