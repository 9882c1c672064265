//! Relevance scoring: cosine similarity plus heuristic boosts.
//!
//! The boost constants were tuned informally against the live corpus, so
//! they are carried as configurable defaults rather than hard invariants.

use serde::{Deserialize, Serialize};

use ragfolio_core::types::{ChunkKind, ContentChunk};

/// Tunable boost weights applied on top of cosine similarity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Scale for the fraction of query tokens found inside content words.
    pub exact_match: f64,
    /// Flat boost when any query token appears inside a title word.
    pub title_match: f64,
    /// Kind boost for profile chunks.
    pub profile_boost: f64,
    /// Kind boost for project chunks; sections get none.
    pub project_boost: f64,
    /// Per-year recency boost above `recency_base_year`.
    pub recency_per_year: f64,
    /// Upper bound on the recency boost.
    pub recency_cap: f64,
    pub recency_base_year: i64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            exact_match: 0.3,
            title_match: 0.2,
            profile_boost: 0.1,
            project_boost: 0.05,
            recency_per_year: 0.02,
            recency_cap: 0.1,
            recency_base_year: 2020,
        }
    }
}

/// Advisory result label; presentational only, never used for filtering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Relevance {
    High,
    Medium,
    Low,
}

impl Relevance {
    pub fn for_score(score: f64) -> Self {
        if score > 0.4 {
            Relevance::High
        } else if score > 0.2 {
            Relevance::Medium
        } else {
            Relevance::Low
        }
    }
}

/// Final relevance score: similarity plus boosts, clamped to at most 1.0.
pub fn relevance_score(
    chunk: &ContentChunk,
    query_tokens: &[String],
    similarity: f64,
    weights: &ScoreWeights,
) -> f64 {
    let mut score = similarity;

    let content = chunk.content.to_lowercase();
    let exact_matches = query_tokens
        .iter()
        .filter(|t| content.split_whitespace().any(|w| w.contains(t.as_str())))
        .count();
    if !query_tokens.is_empty() {
        score += (exact_matches as f64 / query_tokens.len() as f64) * weights.exact_match;
    }

    let title = chunk.title.to_lowercase();
    let title_matched = query_tokens
        .iter()
        .any(|t| title.split_whitespace().any(|w| w.contains(t.as_str())));
    if title_matched {
        score += weights.title_match;
    }

    score += match chunk.kind {
        ChunkKind::Profile => weights.profile_boost,
        ChunkKind::Project => weights.project_boost,
        ChunkKind::Section => 0.0,
    };

    if let Some(year) = metadata_year(chunk) {
        score += (((year - weights.recency_base_year) as f64) * weights.recency_per_year)
            .min(weights.recency_cap);
    }

    score.min(1.0)
}

/// Best-effort read of the optional `year` metadata field: a number, or the
/// leading digits of a string such as "2024-05".
fn metadata_year(chunk: &ContentChunk) -> Option<i64> {
    match chunk.metadata.get("year")? {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => {
            let digits: String = s.trim_start().chars().take_while(char::is_ascii_digit).collect();
            digits.parse().ok()
        }
        _ => None,
    }
}
