//! Persistence collaborator boundary
//!
//! The job and version records are owned by an external store; the
//! orchestration core only sees the [`JobStore`] trait. The in-memory backend
//! serves the demo server and the tests; a database-backed implementation
//! would slot in behind the same trait.

pub mod memory;
pub mod traits;

pub use memory::InMemoryJobStore;
pub use traits::JobStore;
