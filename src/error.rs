use thiserror::Error;
use uuid::Uuid;

/// Central error type for the uiforge workflow engine
#[derive(Error, Debug)]
pub enum UiforgeError {
    // ============================================================================
    // Job / Run Errors
    // ============================================================================
    #[error("Job not found: {0}")]
    JobNotFound(Uuid),

    #[error("Job {0} is already generating")]
    RunConflict(Uuid),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    // ============================================================================
    // Pipeline Errors
    // ============================================================================
    #[error("design phase data missing")]
    DesignPhaseMissing,

    #[error("generate phase data missing")]
    GeneratePhaseMissing,

    #[error("Step '{step}' timed out after {timeout_ms}ms")]
    StepTimeout { step: String, timeout_ms: u64 },

    #[error("Pipeline error: {0}")]
    PipelineError(String),

    // ============================================================================
    // Collaborator Errors
    // ============================================================================
    #[error("Code generation failed: {0}")]
    GenerationFailed(String),

    #[error("Persistence failed: {0}")]
    PersistenceFailed(String),

    #[error("Knowledge base not found: {0}")]
    KnowledgeBaseNotFound(String),

    // ============================================================================
    // Generic/System Errors
    // ============================================================================
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

// Implement conversion to String for transport-layer error payloads
impl From<UiforgeError> for String {
    fn from(error: UiforgeError) -> Self {
        error.to_string()
    }
}

/// Helper type alias for Results
pub type UiforgeResult<T> = Result<T, UiforgeError>;
