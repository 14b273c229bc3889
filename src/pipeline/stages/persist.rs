//! Persist stage: version persistence through the job store

use crate::error::{UiforgeError, UiforgeResult};
use crate::job::{flattened_prompt, ComponentVersion};
use crate::pipeline::context::ExecutionContext;
use crate::pipeline::core::WorkflowStep;
use crate::repository::JobStore;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

/// Marks the job completed and appends the immutable version record
///
/// Requires the generate-phase result. Persistence failures propagate as
/// fatal run failures; this step does not retry on its own, retrying is the
/// caller's decision via the retry decorator.
pub struct PersistStep {
    store: Arc<dyn JobStore>,
}

impl PersistStep {
    pub fn new(store: Arc<dyn JobStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl WorkflowStep for PersistStep {
    async fn execute(&self, context: &mut ExecutionContext) -> UiforgeResult<()> {
        let generate = context
            .state
            .generate_phase
            .clone()
            .ok_or(UiforgeError::GeneratePhaseMissing)?;

        context.stream.log("Saving generated component...");

        let job_id = context.query.job_id;
        let version = self.store.mark_completed(job_id, &context.state).await?;

        self.store
            .append_version(ComponentVersion {
                job_id,
                version,
                code: generate.generated_code,
                prompt: flattened_prompt(&context.query.prompt),
                model: generate.model,
                knowledge_context: generate.knowledge_context,
                created_at: Utc::now(),
            })
            .await?;

        context
            .stream
            .log(format!("Component version {} saved", version));
        Ok(())
    }

    fn name(&self) -> &str {
        "persist"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventSink, StreamEvent};
    use crate::job::{ComponentLibrary, GeneratePhase, Job, JobStatus, PromptPart};
    use crate::pipeline::core::test_support::test_context;
    use crate::repository::InMemoryJobStore;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_persist_fails_without_generate_phase() {
        let step = PersistStep::new(Arc::new(InMemoryJobStore::new()));
        let (mut ctx, _rx) = test_context();

        let error = step.execute(&mut ctx).await.unwrap_err();
        assert!(matches!(error, UiforgeError::GeneratePhaseMissing));
    }

    #[tokio::test]
    async fn test_persist_completes_job_and_appends_version() {
        let store = Arc::new(InMemoryJobStore::new());
        let job = Job::new(
            "Button",
            "a button",
            Uuid::new_v4(),
            ComponentLibrary::Antd,
            vec![PromptPart::text("create a Button component")],
        );
        let id = job.id;
        store.insert_job(job.clone()).await;

        let (sink, mut rx) = EventSink::channel();
        let mut ctx = ExecutionContext::for_job(&job, sink);
        ctx.state.generate_phase = Some(GeneratePhase {
            generated_code: "const x = 1;".to_string(),
            model: "m1".to_string(),
            knowledge_context: "docs".to_string(),
        });

        PersistStep::new(store.clone())
            .execute(&mut ctx)
            .await
            .unwrap();

        let job = store.load_job(id).await.unwrap();
        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.current_version, 2);
        assert!(job.workflow.generate_phase.is_some());

        let versions = store.versions_for(id).await;
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].version, 2);
        assert_eq!(versions[0].code, "const x = 1;");
        assert_eq!(versions[0].prompt, "create a Button component");
        assert_eq!(versions[0].model, "m1");
        assert_eq!(versions[0].knowledge_context, "docs");

        let mut progress = Vec::new();
        while let Ok(StreamEvent::Log { message }) = rx.try_recv() {
            progress.push(message);
        }
        assert!(progress.iter().any(|line| line.contains("version 2 saved")));
    }

    #[tokio::test]
    async fn test_persist_propagates_store_failure() {
        // The job was never inserted, so mark_completed fails
        let store = Arc::new(InMemoryJobStore::new());
        let (mut ctx, _rx) = test_context();
        ctx.state.generate_phase = Some(GeneratePhase {
            generated_code: "code".to_string(),
            model: "m".to_string(),
            knowledge_context: String::new(),
        });

        let error = PersistStep::new(store)
            .execute(&mut ctx)
            .await
            .unwrap_err();
        assert!(matches!(error, UiforgeError::JobNotFound(_)));
    }
}
