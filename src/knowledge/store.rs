//! Knowledge store and relevance scoring
//!
//! The store is constructed explicitly and passed into the stages that need
//! it; there is no process-wide singleton. Initialization is synchronous and
//! the store is immutable afterwards, so an `Arc<KnowledgeStore>` is safe to
//! share across concurrent runs.

use super::corpus;
use super::types::{DocumentChunk, KnowledgeBase, KnowledgeDocument, Relevance, SearchResult};
use crate::error::{UiforgeError, UiforgeResult};
use crate::job::ComponentLibrary;
use std::cmp::Ordering;

/// Minimum score for a document to appear in results
const SCORE_THRESHOLD: f64 = 0.3;

/// Which knowledge bases a search looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnowledgeScope {
    All,
    Library(ComponentLibrary),
}

impl KnowledgeScope {
    fn includes(&self, kb: &KnowledgeBase) -> bool {
        match self {
            KnowledgeScope::All => true,
            KnowledgeScope::Library(lib) => kb.library == *lib,
        }
    }
}

/// In-memory keyword-scored document store
#[derive(Debug, Default)]
pub struct KnowledgeStore {
    bases: Vec<KnowledgeBase>,
}

impl KnowledgeStore {
    /// Empty store; bases are added with [`KnowledgeStore::register`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with the hand-authored library bases
    pub fn with_builtin() -> Self {
        let mut store = Self::new();
        for kb in corpus::builtin() {
            store
                .register(kb)
                .expect("builtin knowledge bases have unique ids");
        }
        store
    }

    /// Register a knowledge base
    ///
    /// Base ids are unique store-wide and document ids unique within a base.
    pub fn register(&mut self, kb: KnowledgeBase) -> UiforgeResult<()> {
        if self.bases.iter().any(|existing| existing.id == kb.id) {
            return Err(UiforgeError::Internal(format!(
                "duplicate knowledge base id: {}",
                kb.id
            )));
        }
        for (i, doc) in kb.documents.iter().enumerate() {
            if kb.documents[..i].iter().any(|other| other.id == doc.id) {
                return Err(UiforgeError::Internal(format!(
                    "duplicate document id in knowledge base {}: {}",
                    kb.id, doc.id
                )));
            }
        }
        self.bases.push(kb);
        Ok(())
    }

    pub fn list_knowledge_bases(&self) -> &[KnowledgeBase] {
        &self.bases
    }

    pub fn get_knowledge_base(&self, id: &str) -> Option<&KnowledgeBase> {
        self.bases.iter().find(|kb| kb.id == id)
    }

    /// Search the in-scope bases, ranked by relevance score
    ///
    /// Documents scoring at or below the inclusion threshold are dropped.
    /// The sort is stable, so equal scores keep registration order.
    pub fn search(&self, query: &str, scope: KnowledgeScope, limit: usize) -> Vec<SearchResult> {
        let mut results: Vec<SearchResult> = Vec::new();

        for kb in self.bases.iter().filter(|kb| scope.includes(kb)) {
            for doc in &kb.documents {
                let score = relevance_score(query, doc);
                if score > SCORE_THRESHOLD {
                    results.push(SearchResult {
                        chunk: DocumentChunk::full(doc),
                        document: doc.clone(),
                        score,
                        relevance: Relevance::from_score(score),
                    });
                }
            }
        }

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        results.truncate(limit);
        results
    }
}

/// Weighted keyword/substring score, clamped to [0, 1]
///
/// Title and component-name matches use the whole query string; body and tag
/// matches are per whitespace-separated token.
fn relevance_score(query: &str, doc: &KnowledgeDocument) -> f64 {
    let query_lower = query.to_lowercase();
    let title_lower = doc.title.to_lowercase();
    let content_lower = doc.content.to_lowercase();

    let mut score = 0.0;

    if title_lower.contains(&query_lower) {
        score += 0.5;
    }
    if let Some(name) = &doc.metadata.component_name {
        if name.to_lowercase().contains(&query_lower) {
            score += 0.4;
        }
    }

    for word in query_lower.split_whitespace() {
        if content_lower.contains(word) {
            score += 0.1;
        }
        if doc.metadata.tags.iter().any(|tag| tag.contains(word)) {
            score += 0.15;
        }
    }

    score.min(1.0)
}
