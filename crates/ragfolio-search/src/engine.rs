//! The search engine: query scoring over the loaded index, mode filtering,
//! and context assembly for the downstream prompt.

use std::cmp::Ordering;
use std::str::FromStr;
use std::time::Instant;

use serde::Serialize;
use tracing::warn;

use ragfolio_core::error::Error;
use ragfolio_core::tfidf::{cosine_similarity, project};
use ragfolio_core::tokenize::tokenize;
use ragfolio_core::traits::IndexStore;
use ragfolio_core::types::{ChunkKind, ContentChunk, RagIndex};

use crate::scoring::{relevance_score, Relevance, ScoreWeights};

/// How many top results feed the context blob for the prompt.
const CONTEXT_RESULTS: usize = 5;

/// Coarse candidate filter applied before scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchMode {
    #[default]
    General,
    Projects,
    Resume,
}

impl FromStr for SearchMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(SearchMode::General),
            "projects" => Ok(SearchMode::Projects),
            "resume" => Ok(SearchMode::Resume),
            other => Err(Error::InvalidConfig(format!("unknown search mode '{}'", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub top_k: usize,
    pub mode: SearchMode,
    pub min_score: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { top_k: 10, mode: SearchMode::General, min_score: 0.1 }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub chunk: ContentChunk,
    pub score: f64,
    pub relevance: Relevance,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub total_results: usize,
    pub query: String,
    pub search_time_ms: f64,
    pub context: String,
    pub sources: Vec<String>,
}

/// Narrowing filters for `advanced_search`. All are optional and combine
/// conjunctively.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    pub kinds: Option<Vec<ChunkKind>>,
    /// Substring matches against chunk sources.
    pub sources: Option<Vec<String>>,
    /// Case-insensitive substring matches against the `tags` metadata list.
    pub tags: Option<Vec<String>>,
}

impl SearchFilters {
    fn matches(&self, chunk: &ContentChunk) -> bool {
        if let Some(kinds) = &self.kinds {
            if !kinds.contains(&chunk.kind) {
                return false;
            }
        }
        if let Some(sources) = &self.sources {
            if !sources.iter().any(|s| chunk.source.contains(s.as_str())) {
                return false;
            }
        }
        if let Some(tags) = &self.tags {
            let chunk_tags: Vec<String> = match chunk.metadata.get("tags") {
                Some(serde_json::Value::Array(items)) => items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_lowercase))
                    .collect(),
                _ => Vec::new(),
            };
            let hit = tags.iter().any(|wanted| {
                let wanted = wanted.to_lowercase();
                chunk_tags.iter().any(|t| t.contains(&wanted))
            });
            if !hit {
                return false;
            }
        }
        true
    }
}

/// One project overview, for listing surfaces.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    pub slug: String,
    pub title: String,
    pub description: String,
}

/// Read-only search over one loaded index.
///
/// The index is loaded at construction and never mutated afterwards; every
/// method is a pure function of it. An engine without an index answers every
/// query with a well-formed empty response so the caller can degrade to its
/// non-retrieval fallback.
pub struct SearchEngine {
    index: Option<RagIndex>,
    weights: ScoreWeights,
}

impl SearchEngine {
    /// Load from a store, degrading to an index-less engine on any failure.
    pub fn from_store(store: &dyn IndexStore) -> Self {
        let index = match store.load() {
            Ok(index) => index,
            Err(e) => {
                warn!(error = %e, "failed to load index; searches return empty responses");
                None
            }
        };
        Self { index, weights: ScoreWeights::default() }
    }

    pub fn from_index(index: RagIndex) -> Self {
        Self { index: Some(index), weights: ScoreWeights::default() }
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn is_ready(&self) -> bool {
        self.index.is_some()
    }

    /// Score every chunk admitted by `options.mode` against the query.
    pub fn search(&self, query: &str, options: &SearchOptions) -> SearchResponse {
        let started = Instant::now();
        let Some(index) = &self.index else {
            return respond(query, Vec::new(), started);
        };
        self.rank(
            index,
            query,
            options,
            |chunk| in_mode(chunk, options.mode),
            started,
        )
    }

    /// General-mode scoring over a candidate set narrowed by `filters`.
    pub fn advanced_search(
        &self,
        query: &str,
        filters: &SearchFilters,
        options: &SearchOptions,
    ) -> SearchResponse {
        let started = Instant::now();
        let Some(index) = &self.index else {
            return respond(query, Vec::new(), started);
        };
        self.rank(index, query, options, |chunk| filters.matches(chunk), started)
    }

    fn rank(
        &self,
        index: &RagIndex,
        query: &str,
        options: &SearchOptions,
        admit: impl Fn(&ContentChunk) -> bool,
        started: Instant,
    ) -> SearchResponse {
        let query_tokens = tokenize(query);
        if query_tokens.is_empty() {
            return respond(query, Vec::new(), started);
        }
        let query_vec = project(&query_tokens, &index.vocabulary, &index.idf);

        let mut results: Vec<SearchResult> = index
            .chunks
            .iter()
            .filter(|chunk| admit(chunk))
            .map(|chunk| {
                let chunk_vec = project(&chunk.tokens, &index.vocabulary, &index.idf);
                let similarity = cosine_similarity(&query_vec, &chunk_vec);
                let score = relevance_score(chunk, &query_tokens, similarity, &self.weights);
                SearchResult { chunk: chunk.clone(), score, relevance: Relevance::for_score(score) }
            })
            .filter(|r| r.score >= options.min_score)
            .collect();

        // Stable sort keeps equal-score results in corpus order, so runs
        // over identical input are reproducible.
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        results.truncate(options.top_k);
        respond(query, results, started)
    }

    /// Cosine-ranked neighbors of a stored chunk, excluding itself.
    pub fn find_similar(&self, chunk_id: &str, top_k: usize) -> Vec<SearchResult> {
        let Some(index) = &self.index else {
            return Vec::new();
        };
        let Some(target) = index.chunks.iter().find(|c| c.id == chunk_id) else {
            return Vec::new();
        };
        let target_vec = project(&target.tokens, &index.vocabulary, &index.idf);

        let mut results: Vec<SearchResult> = index
            .chunks
            .iter()
            .filter(|c| c.id != chunk_id)
            .map(|chunk| {
                let chunk_vec = project(&chunk.tokens, &index.vocabulary, &index.idf);
                let similarity = cosine_similarity(&target_vec, &chunk_vec);
                SearchResult {
                    chunk: chunk.clone(),
                    score: similarity,
                    relevance: Relevance::for_score(similarity),
                }
            })
            .collect();
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        results.truncate(top_k);
        results
    }

    pub fn chunks_by_kind(&self, kind: ChunkKind, limit: Option<usize>) -> Vec<&ContentChunk> {
        let Some(index) = &self.index else {
            return Vec::new();
        };
        let iter = index.chunks.iter().filter(|c| c.kind == kind);
        match limit {
            Some(n) => iter.take(n).collect(),
            None => iter.collect(),
        }
    }

    /// Every project known to the index, from its overview chunks.
    pub fn projects(&self) -> Vec<ProjectSummary> {
        let Some(index) = &self.index else {
            return Vec::new();
        };
        index
            .chunks
            .iter()
            .filter(|c| c.kind == ChunkKind::Project && c.id.contains("overview"))
            .map(|chunk| {
                let title = chunk
                    .metadata
                    .get("title")
                    .and_then(|v| v.as_str())
                    .unwrap_or(&chunk.title)
                    .to_string();
                let description = chunk
                    .metadata
                    .get("description")
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| truncated(&chunk.content, 200));
                ProjectSummary {
                    slug: chunk.slug.clone().unwrap_or_default(),
                    title,
                    description,
                }
            })
            .collect()
    }
}

fn in_mode(chunk: &ContentChunk, mode: SearchMode) -> bool {
    match mode {
        SearchMode::General => true,
        SearchMode::Projects => {
            chunk.kind == ChunkKind::Project
                || (chunk.kind == ChunkKind::Profile && chunk.id.contains("exp"))
        }
        SearchMode::Resume => {
            chunk.kind == ChunkKind::Profile
                || (chunk.kind == ChunkKind::Project
                    && chunk.metadata.get("featured").is_some_and(truthy))
        }
    }
}

/// Truthiness of a loose metadata value, mirroring how the flag is set by
/// hand in front matter (bools, but also "true"/1 from sloppier sources).
fn truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Null => false,
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}

fn truncated(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

fn respond(query: &str, results: Vec<SearchResult>, started: Instant) -> SearchResponse {
    let context = results
        .iter()
        .take(CONTEXT_RESULTS)
        .map(|r| format!("{}: {}", r.chunk.title, r.chunk.content))
        .collect::<Vec<_>>()
        .join("\n\n");
    let mut sources: Vec<String> = Vec::new();
    for r in &results {
        if !sources.contains(&r.chunk.source) {
            sources.push(r.chunk.source.clone());
        }
    }
    SearchResponse {
        total_results: results.len(),
        results,
        query: query.to_string(),
        search_time_ms: started.elapsed().as_secs_f64() * 1000.0,
        context,
        sources,
    }
}
