//! Execution context threaded through the pipeline

use crate::events::EventSink;
use crate::job::{ComponentLibrary, Job, PromptPart, WorkflowState};
use uuid::Uuid;

/// Immutable query parameters of one run
#[derive(Debug, Clone)]
pub struct RunQuery {
    pub job_id: Uuid,
    pub user_id: Uuid,
    pub prompt: Vec<PromptPart>,
    pub library: ComponentLibrary,
}

/// Run-scoped bundle of query, accumulated state and stream handle
///
/// Created at run start, discarded at run end. Exactly one run owns a
/// context; stages mutate `state` in place, strictly one after another.
#[derive(Debug)]
pub struct ExecutionContext {
    pub query: RunQuery,
    pub state: WorkflowState,
    pub stream: EventSink,
}

impl ExecutionContext {
    pub fn new(query: RunQuery, state: WorkflowState, stream: EventSink) -> Self {
        Self {
            query,
            state,
            stream,
        }
    }

    /// Context for a run over a loaded job record
    ///
    /// Rehydrates the workflow state persisted on the job, so a re-run after
    /// a failure resumes from the last completed design phase. The error of a
    /// previous failed run is cleared; a job without prompt items falls back
    /// to its description.
    pub fn for_job(job: &Job, stream: EventSink) -> Self {
        let prompt = if job.prompt.is_empty() {
            vec![PromptPart::text(job.description.clone())]
        } else {
            job.prompt.clone()
        };

        let mut state = job.workflow.clone();
        state.error = None;

        Self {
            query: RunQuery {
                job_id: job.id,
                user_id: job.user_id,
                prompt,
                library: job.library,
            },
            state,
            stream,
        }
    }
}
