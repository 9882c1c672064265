//! Build orchestration: run every content source, compute the TF-IDF model
//! over all synthesized chunks, stamp provenance.

use std::path::Path;

use chrono::Utc;
use tracing::{info, warn};

use ragfolio_core::tfidf;
use ragfolio_core::traits::ChunkSource;
use ragfolio_core::types::{IndexMetadata, RagIndex};

use crate::profile::ProfileSource;
use crate::projects::ProjectsSource;

#[derive(Default)]
pub struct IndexBuilder {
    sources: Vec<Box<dyn ChunkSource>>,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard portfolio layout: `<content_dir>/profile.json` plus
    /// `<content_dir>/projects/*.md[x]`.
    pub fn for_content_dir(content_dir: &Path) -> Self {
        Self::new()
            .with_source(ProfileSource::new(content_dir.join("profile.json")))
            .with_source(ProjectsSource::new(content_dir.join("projects")))
    }

    pub fn with_source(mut self, source: impl ChunkSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Build the index. A failing source contributes zero chunks and the
    /// build continues; a partial index is more useful than none.
    pub fn build(&self) -> RagIndex {
        let mut chunks = Vec::new();
        for source in &self.sources {
            match source.load() {
                Ok(batch) => {
                    info!(source = source.name(), chunks = batch.len(), "loaded content source");
                    chunks.extend(batch);
                }
                Err(e) => {
                    warn!(source = source.name(), error = %e, "content source unavailable, continuing without it");
                }
            }
        }

        let model = tfidf::build_model(&chunks);

        let mut sources: Vec<String> = Vec::new();
        for chunk in &chunks {
            if !sources.contains(&chunk.source) {
                sources.push(chunk.source.clone());
            }
        }

        let metadata = IndexMetadata {
            created_at: Utc::now(),
            total_chunks: chunks.len(),
            sources,
        };
        info!(
            chunks = metadata.total_chunks,
            vocabulary = model.vocabulary.len(),
            sources = metadata.sources.len(),
            "index built"
        );

        RagIndex {
            chunks,
            vocabulary: model.vocabulary,
            idf: model.idf,
            metadata,
        }
    }
}
