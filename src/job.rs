//! Job domain model and status state machine
//!
//! A [`Job`] is owned by the persistence collaborator; the orchestration core
//! only ever holds a transient copy for the duration of one run. Status
//! transitions are driven by the job runner and validated here so that an
//! invalid transition is an error rather than a silent overwrite.

use crate::error::{UiforgeError, UiforgeResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Target component library for a generation job
///
/// A closed set checked at every boundary (context construction, knowledge
/// scope, template selection), so a typo can never fall through to the
/// generic template unnoticed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentLibrary {
    Antd,
    Shadcn,
    Custom,
}

impl ComponentLibrary {
    /// Human-readable library name for prompts and logs
    pub fn display_name(&self) -> &'static str {
        match self {
            ComponentLibrary::Antd => "Ant Design",
            ComponentLibrary::Shadcn => "Shadcn UI",
            ComponentLibrary::Custom => "custom",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentLibrary::Antd => "antd",
            ComponentLibrary::Shadcn => "shadcn",
            ComponentLibrary::Custom => "custom",
        }
    }
}

impl fmt::Display for ComponentLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentLibrary {
    type Err = UiforgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "antd" => Ok(ComponentLibrary::Antd),
            "shadcn" => Ok(ComponentLibrary::Shadcn),
            "custom" => Ok(ComponentLibrary::Custom),
            other => Err(UiforgeError::Internal(format!(
                "unknown component library: {}",
                other
            ))),
        }
    }
}

/// Job execution status
///
/// `Pending -> Designing -> Generating -> Completed`, with `Failed` reachable
/// from the in-progress states. A new run may start from `Pending`, `Failed`
/// or `Completed` (re-generation produces the next version); starting while
/// `Designing` or `Generating` is a conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Designing,
    Generating,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Designing => "designing",
            JobStatus::Generating => "generating",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    /// A run is in flight in these states
    pub fn is_in_progress(&self) -> bool {
        matches!(self, JobStatus::Designing | JobStatus::Generating)
    }

    /// Whether a new run may be started from this state
    pub fn can_start_run(&self) -> bool {
        matches!(
            self,
            JobStatus::Pending | JobStatus::Failed | JobStatus::Completed
        )
    }

    /// Whether `next` is a legal transition from this state
    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        use JobStatus::*;
        match (self, next) {
            (Pending, Designing) | (Pending, Generating) => true,
            (Designing, Generating) | (Designing, Failed) => true,
            (Generating, Completed) | (Generating, Failed) => true,
            // Completed and failed jobs may be re-run
            (Completed, Designing) | (Completed, Generating) => true,
            (Failed, Designing) | (Failed, Generating) => true,
            _ => false,
        }
    }

    /// Validate a transition, returning it on success
    pub fn transition_to(&self, next: JobStatus) -> UiforgeResult<JobStatus> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(UiforgeError::InvalidStateTransition {
                from: self.as_str().to_string(),
                to: next.as_str().to_string(),
            })
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One typed item of the user's prompt (multi-modal input)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptKind {
    Text,
    Image,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptPart {
    #[serde(rename = "type")]
    pub kind: PromptKind,
    pub content: String,
}

impl PromptPart {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: PromptKind::Text,
            content: content.into(),
        }
    }

    pub fn image(content: impl Into<String>) -> Self {
        Self {
            kind: PromptKind::Image,
            content: content.into(),
        }
    }
}

/// First text item of an ordered prompt, if any
pub fn first_text(prompt: &[PromptPart]) -> Option<&str> {
    prompt
        .iter()
        .find(|p| p.kind == PromptKind::Text)
        .map(|p| p.content.as_str())
}

/// All prompt contents joined for the immutable version record
pub fn flattened_prompt(prompt: &[PromptPart]) -> String {
    prompt
        .iter()
        .map(|p| p.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Design-phase result recorded into the workflow state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignPhase {
    pub component_name: String,
    pub component_description: String,
    pub library: ComponentLibrary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retrieved_knowledge: Option<String>,
}

/// Generate-phase result recorded into the workflow state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePhase {
    pub generated_code: String,
    pub model: String,
    pub knowledge_context: String,
}

/// Mutable per-run workflow state, merged into the job record on completion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub design_phase: Option<DesignPhase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generate_phase: Option<GeneratePhase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Persistent generation job record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub user_id: Uuid,
    pub status: JobStatus,
    /// Target library selected at creation time
    pub library: ComponentLibrary,
    pub prompt: Vec<PromptPart>,
    pub workflow: WorkflowState,
    pub current_version: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Create a fresh pending job
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        user_id: Uuid,
        library: ComponentLibrary,
        prompt: Vec<PromptPart>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            user_id,
            status: JobStatus::Pending,
            library,
            prompt,
            workflow: WorkflowState::default(),
            current_version: 1,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Immutable snapshot of one generated component version
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentVersion {
    pub job_id: Uuid,
    pub version: u32,
    pub code: String,
    pub prompt: String,
    pub model: String,
    pub knowledge_context: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_round_trip() {
        for lib in [
            ComponentLibrary::Antd,
            ComponentLibrary::Shadcn,
            ComponentLibrary::Custom,
        ] {
            assert_eq!(lib.as_str().parse::<ComponentLibrary>().unwrap(), lib);
        }
    }

    #[test]
    fn test_unknown_library_rejected() {
        assert!("mui".parse::<ComponentLibrary>().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&JobStatus::Generating).unwrap();
        assert_eq!(json, "\"generating\"");
    }

    #[test]
    fn test_run_start_guard() {
        assert!(JobStatus::Pending.can_start_run());
        assert!(JobStatus::Failed.can_start_run());
        assert!(JobStatus::Completed.can_start_run());
        assert!(!JobStatus::Designing.can_start_run());
        assert!(!JobStatus::Generating.can_start_run());
    }

    #[test]
    fn test_happy_path_transitions() {
        let status = JobStatus::Pending;
        let status = status.transition_to(JobStatus::Designing).unwrap();
        let status = status.transition_to(JobStatus::Generating).unwrap();
        let status = status.transition_to(JobStatus::Completed).unwrap();
        assert_eq!(status, JobStatus::Completed);
    }

    #[test]
    fn test_design_skip_transition() {
        // A resumed run with design data jumps straight to generating
        assert!(JobStatus::Pending.can_transition_to(JobStatus::Generating));
        assert!(JobStatus::Failed.can_transition_to(JobStatus::Generating));
    }

    #[test]
    fn test_failed_reachable_from_in_progress_only() {
        assert!(JobStatus::Designing.can_transition_to(JobStatus::Failed));
        assert!(JobStatus::Generating.can_transition_to(JobStatus::Failed));
        assert!(!JobStatus::Pending.can_transition_to(JobStatus::Failed));
        assert!(!JobStatus::Completed.can_transition_to(JobStatus::Failed));
    }

    #[test]
    fn test_invalid_transition_is_error() {
        let err = JobStatus::Completed
            .transition_to(JobStatus::Failed)
            .unwrap_err();
        assert!(matches!(
            err,
            UiforgeError::InvalidStateTransition { .. }
        ));
    }

    #[test]
    fn test_prompt_helpers() {
        let prompt = vec![
            PromptPart::image("data:image/png;base64,xyz"),
            PromptPart::text("create a Button component"),
            PromptPart::text("primary color"),
        ];
        assert_eq!(first_text(&prompt), Some("create a Button component"));
        assert_eq!(
            flattened_prompt(&prompt),
            "data:image/png;base64,xyz\ncreate a Button component\nprimary color"
        );
    }

    #[test]
    fn test_prompt_part_wire_format() {
        let part = PromptPart::text("hello");
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["content"], "hello");
    }

    #[test]
    fn test_workflow_state_omits_empty_phases() {
        let state = WorkflowState::default();
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_new_job_defaults() {
        let job = Job::new(
            "Button",
            "a button",
            Uuid::new_v4(),
            ComponentLibrary::Antd,
            vec![],
        );
        assert_eq!(job.status, JobStatus::Pending);
        assert_eq!(job.current_version, 1);
        assert!(job.workflow.design_phase.is_none());
    }
}
