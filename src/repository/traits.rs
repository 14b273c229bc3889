//! Job store trait definition

use crate::error::UiforgeResult;
use crate::job::{ComponentVersion, Job, WorkflowState};
use async_trait::async_trait;
use uuid::Uuid;

/// Abstract interface to the job and version records
///
/// The version counter is incremented exactly once per successful
/// generate+persist cycle, inside [`JobStore::mark_completed`].
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Load a job by id
    async fn load_job(&self, id: Uuid) -> UiforgeResult<Job>;

    /// Mark a job as generating at run start
    async fn mark_generating(&self, id: Uuid) -> UiforgeResult<()>;

    /// Mark a job completed, merge the workflow state into the record and
    /// increment the version counter, returning the new version number
    async fn mark_completed(&self, id: Uuid, workflow: &WorkflowState) -> UiforgeResult<u32>;

    /// Mark a job failed, recording the error text into its workflow state
    async fn mark_failed(&self, id: Uuid, error: &str) -> UiforgeResult<()>;

    /// Append an immutable version record
    async fn append_version(&self, version: ComponentVersion) -> UiforgeResult<()>;
}
