//! Step contract and sequential composer

use super::context::ExecutionContext;
use crate::error::UiforgeResult;
use async_trait::async_trait;

/// Name used for steps that do not provide one
pub const UNNAMED_STEP: &str = "unnamed step";

/// A single unit of work in the workflow
///
/// Steps consume the context for side effect and leave their result in it.
/// A failing step returns an error; whether that stops the run is decided by
/// the decorators layered around it.
#[async_trait]
pub trait WorkflowStep: Send + Sync {
    /// Execute this step against the run context
    async fn execute(&self, context: &mut ExecutionContext) -> UiforgeResult<()>;

    /// Step name for logging
    fn name(&self) -> &str {
        UNNAMED_STEP
    }
}

#[async_trait]
impl<T: WorkflowStep + ?Sized> WorkflowStep for Box<T> {
    async fn execute(&self, context: &mut ExecutionContext) -> UiforgeResult<()> {
        (**self).execute(context).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// An ordered sequence of steps executed as one step
///
/// Total ordering: step `i + 1` never begins before step `i` has returned
/// successfully, and the first failure stops the pipeline. Steps of the same
/// pipeline never run concurrently.
pub struct Pipeline {
    name: String,
    steps: Vec<Box<dyn WorkflowStep>>,
}

impl Pipeline {
    pub fn builder(name: impl Into<String>) -> PipelineBuilder {
        PipelineBuilder::new(name)
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}

#[async_trait]
impl WorkflowStep for Pipeline {
    async fn execute(&self, context: &mut ExecutionContext) -> UiforgeResult<()> {
        for (index, step) in self.steps.iter().enumerate() {
            tracing::debug!(
                pipeline = %self.name,
                step = step.name(),
                position = index + 1,
                total = self.steps.len(),
                "executing step"
            );
            step.execute(context).await?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Builder for constructing pipelines
pub struct PipelineBuilder {
    name: String,
    steps: Vec<Box<dyn WorkflowStep>>,
}

impl PipelineBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Append a step to the sequence
    pub fn step<S: WorkflowStep + 'static>(mut self, step: S) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn build(self) -> Pipeline {
        Pipeline {
            name: self.name,
            steps: self.steps,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn test_steps_run_in_declared_order() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::builder("test")
            .step(RecordingStep {
                step_name: "first".to_string(),
                trace: trace.clone(),
            })
            .step(RecordingStep {
                step_name: "second".to_string(),
                trace: trace.clone(),
            })
            .step(RecordingStep {
                step_name: "third".to_string(),
                trace: trace.clone(),
            })
            .build();

        let (mut ctx, _rx) = test_context();
        pipeline.execute(&mut ctx).await.unwrap();

        assert_eq!(*trace.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_pipeline_stops_at_first_failure() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let calls = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::builder("test")
            .step(RecordingStep {
                step_name: "first".to_string(),
                trace: trace.clone(),
            })
            .step(FlakyStep {
                step_name: "broken".to_string(),
                failures: usize::MAX,
                calls,
            })
            .step(RecordingStep {
                step_name: "after-failure".to_string(),
                trace: trace.clone(),
            })
            .build();

        let (mut ctx, _rx) = test_context();
        let result = pipeline.execute(&mut ctx).await;

        assert!(result.is_err());
        // The step after the failure never observes the context
        assert_eq!(*trace.lock().unwrap(), vec!["first"]);
    }

    #[tokio::test]
    async fn test_empty_pipeline_succeeds() {
        let pipeline = Pipeline::builder("empty").build();
        let (mut ctx, _rx) = test_context();
        assert!(pipeline.execute(&mut ctx).await.is_ok());
        assert_eq!(pipeline.step_count(), 0);
    }

    #[test]
    fn test_unnamed_step_uses_placeholder() {
        struct Anonymous;
        #[async_trait::async_trait]
        impl WorkflowStep for Anonymous {
            async fn execute(
                &self,
                _context: &mut crate::pipeline::ExecutionContext,
            ) -> crate::error::UiforgeResult<()> {
                Ok(())
            }
        }
        assert_eq!(Anonymous.name(), UNNAMED_STEP);
    }
}
