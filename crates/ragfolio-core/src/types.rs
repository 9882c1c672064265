//! Domain types shared by the index builder and the search engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type ChunkId = String;

/// Loosely-typed metadata bag. Different source kinds populate different
/// fields (employer, tags, year, featured, ...); consumers must treat every
/// field as optional.
pub type Meta = HashMap<String, serde_json::Value>;

/// Broad category of a chunk's origin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChunkKind {
    /// Structured profile fact (basic info, experience, skills, education).
    Profile,
    /// Project overview or technology-stack summary.
    Project,
    /// Free-text section of a project document body.
    Section,
}

/// The atomic unit of retrievable text.
///
/// - `id`: unique, stable across rebuilds (derived from source + position)
/// - `kind`: serialized as `type` in the artifact
/// - `metadata`: source-specific fields used for boosts/filters, never scored
/// - `slug`: cross-reference to a project, present on project-derived chunks
/// - `tokens`: `content` run through the shared tokenizer, duplicates kept
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentChunk {
    pub id: ChunkId,
    #[serde(rename = "type")]
    pub kind: ChunkKind,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub metadata: Meta,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub tokens: Vec<String>,
}

/// Build provenance stored alongside the chunks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexMetadata {
    pub created_at: DateTime<Utc>,
    pub total_chunks: usize,
    pub sources: Vec<String>,
}

/// The persisted index artifact.
///
/// `vocabulary` order is positional: every TF-IDF vector is indexed by it,
/// so the order must not change between build and search. `idf` has an entry
/// for every vocabulary term. Never mutated once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagIndex {
    pub chunks: Vec<ContentChunk>,
    pub vocabulary: Vec<String>,
    pub idf: HashMap<String, f64>,
    pub metadata: IndexMetadata,
}
