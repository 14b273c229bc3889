//! In-memory job store backend

use super::traits::JobStore;
use crate::error::{UiforgeError, UiforgeResult};
use crate::job::{ComponentVersion, Job, JobStatus, WorkflowState};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Map-backed store for the demo server and tests
#[derive(Debug, Default)]
pub struct InMemoryJobStore {
    jobs: RwLock<HashMap<Uuid, Job>>,
    versions: RwLock<Vec<ComponentVersion>>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a job record (the create path belongs to an external
    /// collaborator; this stands in for it)
    pub async fn insert_job(&self, job: Job) {
        self.jobs.write().await.insert(job.id, job);
    }

    /// All version records for a job, oldest first
    pub async fn versions_for(&self, job_id: Uuid) -> Vec<ComponentVersion> {
        self.versions
            .read()
            .await
            .iter()
            .filter(|v| v.job_id == job_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn load_job(&self, id: Uuid) -> UiforgeResult<Job> {
        self.jobs
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(UiforgeError::JobNotFound(id))
    }

    async fn mark_generating(&self, id: Uuid) -> UiforgeResult<()> {
        let mut jobs = self.jobs.write().await;
        let job = jobs.get_mut(&id).ok_or(UiforgeError::JobNotFound(id))?;
        job.status = JobStatus::Generating;
        job.updated_at = Utc::now();
        Ok(())
    }

    async fn mark_completed(&self, id: Uuid, workflow: &WorkflowState) -> UiforgeResult<u32> {
        let mut jobs = self.jobs.write().await;
        let job = jobs.get_mut(&id).ok_or(UiforgeError::JobNotFound(id))?;
        job.status = JobStatus::Completed;
        job.workflow = workflow.clone();
        job.current_version += 1;
        job.updated_at = Utc::now();
        Ok(job.current_version)
    }

    async fn mark_failed(&self, id: Uuid, error: &str) -> UiforgeResult<()> {
        let mut jobs = self.jobs.write().await;
        let job = jobs.get_mut(&id).ok_or(UiforgeError::JobNotFound(id))?;
        job.status = JobStatus::Failed;
        job.workflow.error = Some(error.to_string());
        job.updated_at = Utc::now();
        Ok(())
    }

    async fn append_version(&self, version: ComponentVersion) -> UiforgeResult<()> {
        self.versions.write().await.push(version);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::PromptPart;

    fn sample_job() -> Job {
        Job::new(
            "Button",
            "a simple button",
            Uuid::new_v4(),
            crate::job::ComponentLibrary::Antd,
            vec![PromptPart::text("create a Button component")],
        )
    }

    #[tokio::test]
    async fn test_load_missing_job() {
        let store = InMemoryJobStore::new();
        let id = Uuid::new_v4();
        assert!(matches!(
            store.load_job(id).await,
            Err(UiforgeError::JobNotFound(missing)) if missing == id
        ));
    }

    #[tokio::test]
    async fn test_mark_generating_updates_status() {
        let store = InMemoryJobStore::new();
        let job = sample_job();
        let id = job.id;
        store.insert_job(job).await;

        store.mark_generating(id).await.unwrap();
        assert_eq!(store.load_job(id).await.unwrap().status, JobStatus::Generating);
    }

    #[tokio::test]
    async fn test_mark_completed_merges_and_bumps_version() {
        let store = InMemoryJobStore::new();
        let job = sample_job();
        let id = job.id;
        store.insert_job(job).await;

        let mut workflow = WorkflowState::default();
        workflow.generate_phase = Some(crate::job::GeneratePhase {
            generated_code: "code".to_string(),
            model: "m".to_string(),
            knowledge_context: String::new(),
        });

        let version = store.mark_completed(id, &workflow).await.unwrap();
        assert_eq!(version, 2);

        let job = store.load_job(id).await.unwrap();
        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.current_version, 2);
        assert!(job.workflow.generate_phase.is_some());
    }

    #[tokio::test]
    async fn test_mark_failed_records_error() {
        let store = InMemoryJobStore::new();
        let job = sample_job();
        let id = job.id;
        store.insert_job(job).await;

        store.mark_failed(id, "model exploded").await.unwrap();
        let job = store.load_job(id).await.unwrap();
        assert_eq!(job.status, JobStatus::Failed);
        assert_eq!(job.workflow.error.as_deref(), Some("model exploded"));
    }

    #[tokio::test]
    async fn test_versions_are_append_only_per_job() {
        let store = InMemoryJobStore::new();
        let job_id = Uuid::new_v4();
        for version in [2, 3] {
            store
                .append_version(ComponentVersion {
                    job_id,
                    version,
                    code: format!("v{}", version),
                    prompt: "p".to_string(),
                    model: "m".to_string(),
                    knowledge_context: String::new(),
                    created_at: Utc::now(),
                })
                .await
                .unwrap();
        }
        store
            .append_version(ComponentVersion {
                job_id: Uuid::new_v4(),
                version: 2,
                code: "other".to_string(),
                prompt: "p".to_string(),
                model: "m".to_string(),
                knowledge_context: String::new(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();

        let versions = store.versions_for(job_id).await;
        assert_eq!(versions.len(), 2);
        assert_eq!(versions[0].version, 2);
        assert_eq!(versions[1].version, 3);
    }
}
