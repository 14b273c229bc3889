//! Job driver: binds one pipeline run to one job record
//!
//! The runner owns the state machine. It checks the run guard before the
//! stream opens, mirrors every status transition to the client, assembles the
//! decorated stage pipeline and guarantees a terminal `complete` or `error`
//! event before the stream closes.

use crate::config::RunnerConfig;
use crate::error::{UiforgeError, UiforgeResult};
use crate::events::{EventSink, StreamEvent};
use crate::generator::CodeGenerator;
use crate::job::JobStatus;
use crate::knowledge::KnowledgeStore;
use crate::pipeline::stages::{DesignStep, GenerateStep, PersistStep};
use crate::pipeline::{ExecutionContext, Pipeline, StepExt, WorkflowStep};
use crate::repository::JobStore;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use uuid::Uuid;

/// Pipeline step mirroring a state machine transition to the stream
struct AnnounceStatus {
    status: JobStatus,
}

#[async_trait]
impl WorkflowStep for AnnounceStatus {
    async fn execute(&self, context: &mut ExecutionContext) -> UiforgeResult<()> {
        context.stream.status_update(self.status);
        Ok(())
    }

    fn name(&self) -> &str {
        "status-update"
    }
}

/// Drives generation runs against the collaborator boundaries
#[derive(Clone)]
pub struct JobRunner {
    store: Arc<dyn JobStore>,
    generator: Arc<dyn CodeGenerator>,
    knowledge: Arc<KnowledgeStore>,
    config: RunnerConfig,
}

impl JobRunner {
    pub fn new(
        store: Arc<dyn JobStore>,
        generator: Arc<dyn CodeGenerator>,
        knowledge: Arc<KnowledgeStore>,
        config: RunnerConfig,
    ) -> Self {
        Self {
            store,
            generator,
            knowledge,
            config,
        }
    }

    /// Start a run for `job_id`
    ///
    /// The existence and conflict checks happen before the stream opens, so a
    /// rejected run emits no events. On success the returned receiver yields
    /// the run's events in production order and closes after the terminal
    /// event. The `generating` guard is a courtesy check against the loaded
    /// record, not a transactional lock.
    pub async fn start(&self, job_id: Uuid) -> UiforgeResult<UnboundedReceiver<StreamEvent>> {
        let job = self.store.load_job(job_id).await?;
        if !job.status.can_start_run() {
            return Err(UiforgeError::RunConflict(job_id));
        }
        self.store.mark_generating(job_id).await?;

        let (sink, rx) = EventSink::channel();
        let context = ExecutionContext::for_job(&job, sink);
        let runner = self.clone();
        tokio::spawn(async move {
            runner.drive(context).await;
        });
        Ok(rx)
    }

    /// Execute the pipeline for an already admitted run
    ///
    /// Dropping the context at the end releases the last sink and closes the
    /// stream.
    async fn drive(&self, mut context: ExecutionContext) {
        let job_id = context.query.job_id;
        let skip_design = context.state.design_phase.is_some();

        let mut builder = Pipeline::builder("component-generation");
        if skip_design {
            context
                .stream
                .log("Design phase already completed, resuming from generation");
        } else {
            builder = builder
                .step(AnnounceStatus {
                    status: JobStatus::Designing,
                })
                .step(
                    DesignStep::new(self.knowledge.clone(), self.config.knowledge_limit)
                        .with_timeout(self.config.design_timeout())
                        .with_retry(self.config.design_retries, self.config.retry_backoff())
                        .logged(),
                );
        }
        // Retry is not applied to the generate stage: a second attempt would
        // re-emit code-chunk events into a stream the client is already
        // concatenating. The fallback template path covers backend failures.
        let workflow = builder
            .step(AnnounceStatus {
                status: JobStatus::Generating,
            })
            .step(
                GenerateStep::new(self.generator.clone(), self.config.fallback_chunk_delay())
                    .with_timeout(self.config.generate_timeout())
                    .logged(),
            )
            .step(
                PersistStep::new(self.store.clone())
                    .with_retry(self.config.persist_retries, self.config.retry_backoff())
                    .logged(),
            )
            .build()
            .error_boundary();

        // The error boundary makes the composed workflow infallible
        let _ = workflow.execute(&mut context).await;

        match (&context.state.error, &context.state.generate_phase) {
            (None, Some(generate)) => {
                context.stream.status_update(JobStatus::Completed);
                context
                    .stream
                    .complete(job_id, generate.generated_code.clone());
                tracing::info!(%job_id, "run completed");
            }
            (error, _) => {
                let message = match error {
                    Some(message) => message.clone(),
                    None => {
                        let message = "run finished without generated code".to_string();
                        context.stream.error(message.clone());
                        message
                    }
                };
                if let Err(store_error) = self.store.mark_failed(job_id, &message).await {
                    tracing::error!(%job_id, %store_error, "failed to record job failure");
                }
                context.stream.status_update(JobStatus::Failed);
                tracing::warn!(%job_id, %message, "run failed");
            }
        }
    }
}
