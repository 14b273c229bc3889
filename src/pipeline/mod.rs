//! Workflow pipeline
//!
//! A pipeline is an ordered sequence of [`WorkflowStep`]s threading one
//! [`ExecutionContext`] through each step in turn. Cross-cutting behavior
//! (logging, timeout, retry, error capture) is layered on with the decorators
//! in [`decorators`]; the stage steps themselves live in [`stages`].

pub mod context;
pub mod core;
pub mod decorators;
pub mod stages;

pub use context::{ExecutionContext, RunQuery};
pub use core::{Pipeline, PipelineBuilder, WorkflowStep};
pub use decorators::{ErrorBoundary, Logged, StepExt, WithRetry, WithTimeout};
pub use stages::{DesignStep, GenerateStep, PersistStep};
