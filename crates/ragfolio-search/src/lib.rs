//! ragfolio-search
//!
//! Request-time retrieval over the persisted TF-IDF index. The engine loads
//! the artifact once, holds it immutably, and answers every query as a pure
//! in-memory computation, so one engine is safe to share across concurrent
//! requests without locking.

pub mod engine;
pub mod scoring;

pub use engine::{
    ProjectSummary, SearchEngine, SearchFilters, SearchMode, SearchOptions, SearchResponse,
    SearchResult,
};
pub use scoring::{Relevance, ScoreWeights};
