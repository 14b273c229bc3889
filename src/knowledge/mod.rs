//! Knowledge retrieval for generation prompts
//!
//! A small static corpus of component-library documentation, scored by
//! keyword and substring overlap. This is deliberately not semantic search:
//! the corpus is hand-authored and tiny, and the scoring function is a fixed
//! weighted sum over title, component name, body and tag matches.

pub mod corpus;
pub mod store;
pub mod types;

pub use store::{KnowledgeScope, KnowledgeStore};
pub use types::{
    Complexity, DocumentChunk, DocumentMetadata, KnowledgeBase, KnowledgeDocument, Relevance,
    SearchResult,
};
