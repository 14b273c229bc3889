//! Knowledge corpus types
//!
//! Read-only after initialization; shared across concurrent runs without
//! locking. Documents carry their decomposition unit ([`DocumentChunk`]) even
//! though each document is currently its own single chunk.

use crate::job::ComponentLibrary;
use serde::{Deserialize, Serialize};

/// Implementation complexity tier of a documented component
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Basic,
    Intermediate,
    Advanced,
}

/// Descriptive metadata attached to a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_name: Option<String>,
    pub category: String,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
    pub complexity: Complexity,
}

/// One documentation entry of a knowledge base
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeDocument {
    pub id: String,
    pub title: String,
    pub content: String,
    pub metadata: DocumentMetadata,
}

/// A group of documents for one target component library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub id: String,
    pub name: String,
    pub description: String,
    pub library: ComponentLibrary,
    pub documents: Vec<KnowledgeDocument>,
}

/// Decomposition unit of a document
///
/// Currently synthesized at query time as the whole document body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentChunk {
    pub id: String,
    pub content: String,
    pub start_index: usize,
    pub end_index: usize,
}

impl DocumentChunk {
    /// Whole-document chunk for a document
    pub fn full(doc: &KnowledgeDocument) -> Self {
        Self {
            id: format!("{}-full", doc.id),
            content: doc.content.clone(),
            start_index: 0,
            end_index: doc.content.len(),
        }
    }
}

/// Relevance tier derived from a search score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relevance {
    High,
    Medium,
    Low,
}

impl Relevance {
    /// Tier thresholds: high above 0.7, medium above 0.5
    pub fn from_score(score: f64) -> Self {
        if score > 0.7 {
            Relevance::High
        } else if score > 0.5 {
            Relevance::Medium
        } else {
            Relevance::Low
        }
    }
}

/// One ranked search hit; transient, never stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub document: KnowledgeDocument,
    pub chunk: DocumentChunk,
    pub score: f64,
    pub relevance: Relevance,
}
