use crate::types::{ContentChunk, RagIndex};

/// A read-only content source ingested at build time.
pub trait ChunkSource: Send + Sync {
    /// Label used in logs and in the index's `sources` provenance list.
    fn name(&self) -> &str;

    /// Load the source and synthesize its chunks, `tokens` already
    /// populated via the shared tokenizer. A failing source returns `Err`;
    /// the builder recovers by treating it as empty.
    fn load(&self) -> anyhow::Result<Vec<ContentChunk>>;
}

/// Opaque load/save target for the persisted index artifact.
pub trait IndexStore: Send + Sync {
    /// `Ok(None)` when no artifact has been persisted yet.
    fn load(&self) -> anyhow::Result<Option<RagIndex>>;

    /// Persist the artifact without corrupting a previously saved one on
    /// failure.
    fn save(&self, index: &RagIndex) -> anyhow::Result<()>;
}
