//! Runner configuration
//!
//! Timeouts and retry budgets for the stage decorators, plus the knobs of the
//! fallback streaming path. Deserializable so a deployment can override the
//! defaults; every field has a standalone default so partial configs work.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunnerConfig {
    /// Deadline for the design stage
    pub design_timeout_ms: u64,

    /// Deadline for the generate stage
    pub generate_timeout_ms: u64,

    /// Attempts for the design stage
    pub design_retries: u32,

    /// Attempts for the persist stage
    pub persist_retries: u32,

    /// Base backoff between retry attempts (multiplied by the attempt number)
    pub retry_backoff_ms: u64,

    /// Pause between emitted lines when streaming fallback template output
    pub fallback_chunk_delay_ms: u64,

    /// Number of knowledge documents retrieved for the generation prompt
    pub knowledge_limit: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            design_timeout_ms: 30_000,
            generate_timeout_ms: 60_000,
            design_retries: 3,
            persist_retries: 3,
            retry_backoff_ms: 1_000,
            fallback_chunk_delay_ms: 50,
            knowledge_limit: 3,
        }
    }
}

impl RunnerConfig {
    pub fn design_timeout(&self) -> Duration {
        Duration::from_millis(self.design_timeout_ms)
    }

    pub fn generate_timeout(&self) -> Duration {
        Duration::from_millis(self.generate_timeout_ms)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    pub fn fallback_chunk_delay(&self) -> Duration {
        Duration::from_millis(self.fallback_chunk_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunnerConfig::default();
        assert_eq!(config.design_timeout(), Duration::from_secs(30));
        assert_eq!(config.generate_timeout(), Duration::from_secs(60));
        assert_eq!(config.knowledge_limit, 3);
    }

    #[test]
    fn test_partial_config_deserializes() {
        let config: RunnerConfig =
            serde_json::from_str(r#"{"generateTimeoutMs": 5000}"#).unwrap();
        assert_eq!(config.generate_timeout(), Duration::from_secs(5));
        // Untouched fields keep their defaults
        assert_eq!(config.persist_retries, 3);
    }
}
