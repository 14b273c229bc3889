//! Code-generation collaborator boundary
//!
//! The workflow core never talks to a model provider directly; it calls a
//! [`CodeGenerator`] and forwards every increment the generator yields to the
//! client stream. When the generator fails, the generate stage falls back to
//! the deterministic templates in [`templates`], so a run can always finish.

pub mod templates;

use crate::error::{UiforgeError, UiforgeResult};
use crate::job::ComponentLibrary;
use async_trait::async_trait;

/// Model identifier recorded when the fallback templates produced the code
pub const FALLBACK_MODEL_ID: &str = "template-fallback";

/// Callback receiving each increment of generated code as it is produced
pub type ChunkHandler<'a> = &'a (dyn Fn(&str) + Send + Sync);

/// Streaming code generation backend
#[async_trait]
pub trait CodeGenerator: Send + Sync {
    /// Identifier of the model recorded into the version history
    fn model_id(&self) -> &str;

    /// Generate component code for `prompt`, yielding increments to
    /// `on_chunk` and returning the full code on completion
    async fn generate(
        &self,
        prompt: &str,
        library: ComponentLibrary,
        on_chunk: ChunkHandler<'_>,
    ) -> UiforgeResult<String>;
}

/// Generator used when no model backend is configured
///
/// Always fails, which routes every run through the template fallback path.
/// The client-observable protocol is identical either way.
#[derive(Debug, Default)]
pub struct OfflineGenerator;

#[async_trait]
impl CodeGenerator for OfflineGenerator {
    fn model_id(&self) -> &str {
        "offline"
    }

    async fn generate(
        &self,
        _prompt: &str,
        _library: ComponentLibrary,
        _on_chunk: ChunkHandler<'_>,
    ) -> UiforgeResult<String> {
        Err(UiforgeError::GenerationFailed(
            "no code generation backend configured".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_generator_always_fails() {
        let generator = OfflineGenerator;
        let result = generator
            .generate("create a Button component", ComponentLibrary::Antd, &|_| {})
            .await;
        assert!(matches!(result, Err(UiforgeError::GenerationFailed(_))));
    }
}
