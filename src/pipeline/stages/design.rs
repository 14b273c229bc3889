//! Design stage: requirement analysis and knowledge retrieval

use crate::error::UiforgeResult;
use crate::generator::templates::extract_component_name;
use crate::job::{first_text, ComponentLibrary, DesignPhase};
use crate::knowledge::{Complexity, KnowledgeScope, KnowledgeStore};
use crate::pipeline::context::ExecutionContext;
use crate::pipeline::core::WorkflowStep;
use async_trait::async_trait;
use std::sync::Arc;

/// Fixed vocabulary of UI-concept terms recognized in requirements
const UI_KEYWORDS: &[&str] = &[
    "button",
    "form",
    "input",
    "table",
    "card",
    "modal",
    "dropdown",
    "menu",
    "navigation",
    "sidebar",
    "header",
    "footer",
    "layout",
    "chart",
    "graph",
    "list",
    "grid",
    "carousel",
    "tabs",
    "accordion",
];

const ADVANCED_KEYWORDS: &[&str] = &[
    "complex",
    "advanced",
    "animation",
    "interactive",
    "state management",
];

const INTERMEDIATE_KEYWORDS: &[&str] = &["validation", "data processing", "event handling"];

/// Maximum length of the derived component description
const DESCRIPTION_LIMIT: usize = 200;

/// Derived view of the user's free-text requirements
#[derive(Debug, PartialEq)]
struct RequirementAnalysis {
    component_name: String,
    description: String,
    keywords: Vec<String>,
    complexity: Complexity,
}

fn extract_keywords(text: &str) -> Vec<String> {
    let text_lower = text.to_lowercase();
    UI_KEYWORDS
        .iter()
        .filter(|keyword| text_lower.contains(*keyword))
        .map(|keyword| keyword.to_string())
        .collect()
}

/// Name fallback when no explicit "create X component" phrase is present.
/// A missing match is a policy choice, not an error.
fn guess_component_type(keywords: &[String]) -> &'static str {
    for (keyword, name) in [
        ("button", "Button"),
        ("form", "Form"),
        ("table", "Table"),
        ("card", "Card"),
        ("modal", "Modal"),
    ] {
        if keywords.iter().any(|k| k == keyword) {
            return name;
        }
    }
    "Component"
}

fn guess_complexity(prompt: &str) -> Complexity {
    let prompt_lower = prompt.to_lowercase();
    if ADVANCED_KEYWORDS.iter().any(|kw| prompt_lower.contains(kw)) {
        Complexity::Advanced
    } else if INTERMEDIATE_KEYWORDS
        .iter()
        .any(|kw| prompt_lower.contains(kw))
    {
        Complexity::Intermediate
    } else {
        Complexity::Basic
    }
}

fn analyze_requirements(prompt: &str) -> RequirementAnalysis {
    let keywords = extract_keywords(prompt);
    let component_name = extract_component_name(prompt)
        .unwrap_or_else(|| guess_component_type(&keywords).to_string());

    RequirementAnalysis {
        component_name,
        description: prompt.chars().take(DESCRIPTION_LIMIT).collect(),
        keywords,
        complexity: guess_complexity(prompt),
    }
}

/// Derives the component design and retrieves supporting knowledge
///
/// Records a [`DesignPhase`] into the context state. Nothing here is fatal:
/// an unmatched component name falls back to a generic label and an empty
/// search result simply leaves the generation prompt without extra context.
pub struct DesignStep {
    knowledge: Arc<KnowledgeStore>,
    knowledge_limit: usize,
}

impl DesignStep {
    pub fn new(knowledge: Arc<KnowledgeStore>, knowledge_limit: usize) -> Self {
        Self {
            knowledge,
            knowledge_limit,
        }
    }

    /// Query terms for the knowledge search: the derived name plus extracted
    /// keywords, minus keywords that repeat the name itself
    fn search_query(analysis: &RequirementAnalysis) -> String {
        let name_lower = analysis.component_name.to_lowercase();
        let mut terms = vec![analysis.component_name.clone()];
        terms.extend(
            analysis
                .keywords
                .iter()
                .filter(|keyword| **keyword != name_lower)
                .cloned(),
        );
        terms.join(" ")
    }
}

#[async_trait]
impl WorkflowStep for DesignStep {
    async fn execute(&self, context: &mut ExecutionContext) -> UiforgeResult<()> {
        let prompt_text = first_text(&context.query.prompt).unwrap_or_default();
        let analysis = analyze_requirements(prompt_text);

        context.stream.log(format!(
            "Component analysis complete: {} ({:?})",
            analysis.component_name, analysis.complexity
        ));

        let scope = match context.query.library {
            ComponentLibrary::Custom => KnowledgeScope::All,
            library => KnowledgeScope::Library(library),
        };
        let results = self.knowledge.search(
            &Self::search_query(&analysis),
            scope,
            self.knowledge_limit,
        );

        context.stream.log(format!(
            "Knowledge retrieval complete: {} relevant documents",
            results.len()
        ));

        let retrieved = results
            .iter()
            .map(|result| result.chunk.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        context.state.design_phase = Some(DesignPhase {
            component_name: analysis.component_name,
            component_description: analysis.description,
            library: context.query.library,
            retrieved_knowledge: if retrieved.is_empty() {
                None
            } else {
                Some(retrieved)
            },
        });

        Ok(())
    }

    fn name(&self) -> &str {
        "design"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::StreamEvent;
    use crate::pipeline::core::test_support::test_context;

    #[test]
    fn test_extract_keywords() {
        let keywords = extract_keywords("a dashboard with a table, a chart and tabs");
        assert_eq!(keywords, vec!["table", "chart", "tabs"]);
    }

    #[test]
    fn test_guess_component_type_priority() {
        let keywords = vec!["form".to_string(), "button".to_string()];
        // Vocabulary order decides, not keyword order
        assert_eq!(guess_component_type(&keywords), "Button");
        assert_eq!(guess_component_type(&[]), "Component");
    }

    #[test]
    fn test_guess_complexity() {
        assert_eq!(guess_complexity("a simple label"), Complexity::Basic);
        assert_eq!(
            guess_complexity("a form with validation rules"),
            Complexity::Intermediate
        );
        assert_eq!(
            guess_complexity("complex grid with animation"),
            Complexity::Advanced
        );
    }

    #[test]
    fn test_analysis_prefers_explicit_name() {
        let analysis = analyze_requirements("create a SearchBar component with a button");
        assert_eq!(analysis.component_name, "SearchBar");
        assert_eq!(analysis.keywords, vec!["button"]);
    }

    #[test]
    fn test_analysis_falls_back_to_keyword_guess() {
        let analysis = analyze_requirements("I want a nice modal dialog");
        assert_eq!(analysis.component_name, "Modal");
    }

    #[test]
    fn test_search_query_drops_redundant_keywords() {
        let analysis = analyze_requirements("create a Button component");
        assert_eq!(DesignStep::search_query(&analysis), "Button");

        let analysis = analyze_requirements("create a LoginForm component with a button");
        assert_eq!(DesignStep::search_query(&analysis), "LoginForm form button");
    }

    #[tokio::test]
    async fn test_design_step_records_phase_and_knowledge() {
        let step = DesignStep::new(Arc::new(KnowledgeStore::with_builtin()), 3);
        let (mut ctx, mut rx) = test_context();

        step.execute(&mut ctx).await.unwrap();

        let design = ctx.state.design_phase.as_ref().unwrap();
        assert_eq!(design.component_name, "Button");
        assert_eq!(design.library, ComponentLibrary::Antd);
        let knowledge = design.retrieved_knowledge.as_ref().unwrap();
        assert!(knowledge.contains("Button triggers an operation"));

        let mut progress = Vec::new();
        while let Ok(StreamEvent::Log { message }) = rx.try_recv() {
            progress.push(message);
        }
        assert!(progress[0].starts_with("Component analysis complete: Button"));
        assert!(progress[1].starts_with("Knowledge retrieval complete:"));
    }

    #[tokio::test]
    async fn test_design_step_with_empty_corpus_still_succeeds() {
        let step = DesignStep::new(Arc::new(KnowledgeStore::new()), 3);
        let (mut ctx, _rx) = test_context();

        step.execute(&mut ctx).await.unwrap();

        let design = ctx.state.design_phase.as_ref().unwrap();
        assert!(design.retrieved_knowledge.is_none());
    }
}
