//! Cross-cutting step decorators
//!
//! Each decorator wraps a step and is itself a step, so they nest in any
//! order. Every decorator below the outermost layer re-raises failures after
//! reporting them; only [`ErrorBoundary`] terminates propagation, and it must
//! therefore wrap the whole composed pipeline — swallowing an error inside a
//! chain would let downstream steps run on corrupt state.

use super::context::ExecutionContext;
use super::core::WorkflowStep;
use crate::error::{UiforgeError, UiforgeResult};
use async_trait::async_trait;
use std::time::{Duration, Instant};

/// Streams "started" / "finished" / "failed" lines around the wrapped step
pub struct Logged<S> {
    inner: S,
}

impl<S> Logged<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: WorkflowStep> WorkflowStep for Logged<S> {
    async fn execute(&self, context: &mut ExecutionContext) -> UiforgeResult<()> {
        let step_name = self.inner.name().to_string();
        let started = Instant::now();
        context.stream.log(format!("{} started...", step_name));
        tracing::info!(step = %step_name, "step started");

        match self.inner.execute(context).await {
            Ok(()) => {
                let elapsed = started.elapsed().as_millis();
                context
                    .stream
                    .log(format!("{} finished ({}ms)", step_name, elapsed));
                tracing::info!(step = %step_name, elapsed_ms = elapsed as u64, "step finished");
                Ok(())
            }
            Err(error) => {
                let elapsed = started.elapsed().as_millis();
                context
                    .stream
                    .log(format!("{} failed ({}ms)", step_name, elapsed));
                tracing::warn!(step = %step_name, elapsed_ms = elapsed as u64, %error, "step failed");
                Err(error)
            }
        }
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// Races the wrapped step against a deadline
///
/// When the deadline fires the step's future is dropped and the run fails
/// with a timeout error; whatever the step would eventually have produced is
/// discarded.
pub struct WithTimeout<S> {
    inner: S,
    timeout: Duration,
}

impl<S> WithTimeout<S> {
    pub fn new(inner: S, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl<S: WorkflowStep> WorkflowStep for WithTimeout<S> {
    async fn execute(&self, context: &mut ExecutionContext) -> UiforgeResult<()> {
        match tokio::time::timeout(self.timeout, self.inner.execute(context)).await {
            Ok(result) => result,
            Err(_) => Err(UiforgeError::StepTimeout {
                step: self.inner.name().to_string(),
                timeout_ms: self.timeout.as_millis() as u64,
            }),
        }
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// Re-invokes the wrapped step up to `attempts` times
///
/// Waits `backoff * attempt` between attempts and streams a retry notice.
/// Every attempt sees the same context, including mutations left behind by
/// the failed ones; after the last attempt the original error propagates.
pub struct WithRetry<S> {
    inner: S,
    attempts: u32,
    backoff: Duration,
}

impl<S> WithRetry<S> {
    pub fn new(inner: S, attempts: u32, backoff: Duration) -> Self {
        Self {
            inner,
            attempts: attempts.max(1),
            backoff,
        }
    }
}

#[async_trait]
impl<S: WorkflowStep> WorkflowStep for WithRetry<S> {
    async fn execute(&self, context: &mut ExecutionContext) -> UiforgeResult<()> {
        let mut last_error = None;

        for attempt in 1..=self.attempts {
            match self.inner.execute(context).await {
                Ok(()) => return Ok(()),
                Err(error) => {
                    tracing::warn!(
                        step = self.inner.name(),
                        attempt,
                        attempts = self.attempts,
                        %error,
                        "attempt failed"
                    );
                    last_error = Some(error);
                    if attempt < self.attempts {
                        context.stream.log(format!(
                            "Retrying {} (attempt {} of {})...",
                            self.inner.name(),
                            attempt + 1,
                            self.attempts
                        ));
                        tokio::time::sleep(self.backoff * attempt).await;
                    }
                }
            }
        }

        Err(last_error.expect("at least one attempt was made"))
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// Terminal boundary converting a failure into recorded context state
///
/// Streams the error to the client, records it into `state.error` and
/// swallows it. Used only at the outermost layer of a run.
pub struct ErrorBoundary<S> {
    inner: S,
}

impl<S> ErrorBoundary<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: WorkflowStep> WorkflowStep for ErrorBoundary<S> {
    async fn execute(&self, context: &mut ExecutionContext) -> UiforgeResult<()> {
        if let Err(error) = self.inner.execute(context).await {
            let message = error.to_string();
            tracing::error!(step = self.inner.name(), %message, "run failed");
            context.stream.error(message.clone());
            context.state.error = Some(message);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// Fluent decorator composition
pub trait StepExt: WorkflowStep + Sized {
    fn logged(self) -> Logged<Self> {
        Logged::new(self)
    }

    fn with_timeout(self, timeout: Duration) -> WithTimeout<Self> {
        WithTimeout::new(self, timeout)
    }

    fn with_retry(self, attempts: u32, backoff: Duration) -> WithRetry<Self> {
        WithRetry::new(self, attempts, backoff)
    }

    fn error_boundary(self) -> ErrorBoundary<Self> {
        ErrorBoundary::new(self)
    }
}

impl<S: WorkflowStep + Sized> StepExt for S {}
