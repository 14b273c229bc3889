//! Stream event protocol and sink
//!
//! One [`StreamEvent`] per line of the push channel, tagged by `type` exactly
//! as the client decodes it. The [`EventSink`] is the write half handed to the
//! pipeline; the receiver half belongs to the transport. Events are delivered
//! in production order — the sink is a FIFO channel with a single writer per
//! run. A disconnected client makes sends fail silently; the run keeps going.

use crate::job::JobStatus;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

/// Server-to-client stream event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StreamEvent {
    /// Human-readable progress line
    Log { message: String },

    /// Non-terminal or terminal error notice
    Error { message: String },

    /// Code streaming begins
    CodeStart,

    /// One increment of generated code
    CodeChunk { chunk: String },

    /// Code streaming ends
    CodeComplete,

    /// Job state machine transition
    StatusUpdate { status: JobStatus },

    /// Terminal success
    #[serde(rename_all = "camelCase")]
    Complete {
        codegen_id: Uuid,
        generated_code: String,
    },
}

/// Write half of a run's event stream
///
/// Cheap to clone; all clones feed the same ordered channel. Emission never
/// fails from the caller's point of view: once the client is gone the events
/// are dropped on the floor, matching the at-most-once delivery contract.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: UnboundedSender<StreamEvent>,
}

impl EventSink {
    /// Create a sink together with its transport-side receiver
    pub fn channel() -> (Self, UnboundedReceiver<StreamEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn emit(&self, event: StreamEvent) {
        let _ = self.tx.send(event);
    }

    /// Emit a progress line
    pub fn log(&self, message: impl Into<String>) {
        self.emit(StreamEvent::Log {
            message: message.into(),
        });
    }

    /// Emit an error notice
    pub fn error(&self, message: impl Into<String>) {
        self.emit(StreamEvent::Error {
            message: message.into(),
        });
    }

    /// Notify the client that code streaming begins
    pub fn code_start(&self) {
        self.emit(StreamEvent::CodeStart);
    }

    /// Forward one increment of generated code
    pub fn code_chunk(&self, chunk: impl Into<String>) {
        self.emit(StreamEvent::CodeChunk {
            chunk: chunk.into(),
        });
    }

    /// Notify the client that code streaming ended
    pub fn code_complete(&self) {
        self.emit(StreamEvent::CodeComplete);
    }

    /// Mirror a job status transition to the client
    pub fn status_update(&self, status: JobStatus) {
        self.emit(StreamEvent::StatusUpdate { status });
    }

    /// Terminal success event
    pub fn complete(&self, codegen_id: Uuid, generated_code: impl Into<String>) {
        self.emit(StreamEvent::Complete {
            codegen_id,
            generated_code: generated_code.into(),
        });
    }
}
