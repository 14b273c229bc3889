//! Generate stage: streamed code synthesis with deterministic fallback

use crate::error::{UiforgeError, UiforgeResult};
use crate::generator::{templates, CodeGenerator, FALLBACK_MODEL_ID};
use crate::job::{first_text, ComponentLibrary, GeneratePhase};
use crate::pipeline::context::ExecutionContext;
use crate::pipeline::core::WorkflowStep;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Streams generated code to the client and records the result
///
/// Delegates to the code-generation collaborator; every increment it yields
/// is forwarded verbatim as a `code-chunk` event. When the collaborator
/// fails, the per-library template output is streamed line-by-line with a
/// fixed pause so the client-observable protocol stays identical.
pub struct GenerateStep {
    generator: Arc<dyn CodeGenerator>,
    fallback_chunk_delay: Duration,
}

impl GenerateStep {
    pub fn new(generator: Arc<dyn CodeGenerator>, fallback_chunk_delay: Duration) -> Self {
        Self {
            generator,
            fallback_chunk_delay,
        }
    }

    async fn stream_fallback(&self, context: &ExecutionContext, code: &str) {
        for line in code.lines() {
            context.stream.code_chunk(format!("{}\n", line));
            if !self.fallback_chunk_delay.is_zero() {
                tokio::time::sleep(self.fallback_chunk_delay).await;
            }
        }
    }
}

#[async_trait]
impl WorkflowStep for GenerateStep {
    async fn execute(&self, context: &mut ExecutionContext) -> UiforgeResult<()> {
        let design = context
            .state
            .design_phase
            .clone()
            .ok_or(UiforgeError::DesignPhaseMissing)?;

        let prompt_text = first_text(&context.query.prompt).unwrap_or_default();
        let knowledge = design.retrieved_knowledge.clone().unwrap_or_default();
        let prompt = build_enhanced_prompt(prompt_text, &knowledge, context.query.library);

        context.stream.log("Streaming code generation...");
        context.stream.code_start();

        let sink = context.stream.clone();
        let forward = |chunk: &str| sink.code_chunk(chunk);

        let (generated_code, model) = match self
            .generator
            .generate(&prompt, context.query.library, &forward)
            .await
        {
            Ok(code) => (code, self.generator.model_id().to_string()),
            Err(error) => {
                tracing::warn!(%error, "code generation backend failed, using template fallback");
                context.stream.log(format!(
                    "Generation backend unavailable ({}), falling back to template output",
                    error
                ));
                let code = templates::fallback_code(prompt_text, context.query.library);
                self.stream_fallback(context, &code).await;
                (code, FALLBACK_MODEL_ID.to_string())
            }
        };

        context.stream.code_complete();
        context.stream.log("Code generation complete");

        context.state.generate_phase = Some(GeneratePhase {
            generated_code,
            model,
            knowledge_context: knowledge,
        });

        Ok(())
    }

    fn name(&self) -> &str {
        "generate"
    }
}

/// Augmented prompt embedding the request, retrieved knowledge and library
fn build_enhanced_prompt(
    user_prompt: &str,
    knowledge_context: &str,
    library: ComponentLibrary,
) -> String {
    format!(
        r#"You are a professional front-end engineer. Generate high-quality React component code for the following request.

User requirements:
{user_prompt}

Technical constraints:
- Use the {library} component library
- Use TypeScript
- Use React Hooks
- Follow best practices

Relevant library documentation:
{knowledge_context}

Produce the complete component code, including:
1. Necessary import statements
2. TypeScript interface definitions
3. The main component implementation
4. Appropriate comments
5. Basic styling

Requirements:
- Clear and readable structure
- Follow the design conventions of the component library
- Consider accessibility and user experience
- Provide sensible defaults and error handling
"#,
        user_prompt = user_prompt,
        library = library.display_name(),
        knowledge_context = knowledge_context,
    )
}
