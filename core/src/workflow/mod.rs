// pricetag/src/workflow/mod.rs

//! The `Workflow<TData, Err>` step engine the orchestrators are built on:
//! definition, handler registration, execution.

pub mod definition;
pub mod execution;
pub mod hooks;

pub use definition::Workflow;
