//! Workflow stage steps
//!
//! The three stages of a generation run, in execution order: requirement
//! analysis and knowledge retrieval, streamed code synthesis, and version
//! persistence. Each stage consumes and mutates the execution context.

pub mod design;
pub mod generate;
pub mod persist;

pub use design::DesignStep;
pub use generate::GenerateStep;
pub use persist::PersistStep;
