//! Filesystem store for the persisted index artifact.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use ragfolio_core::error::Error;
use ragfolio_core::traits::IndexStore;
use ragfolio_core::types::RagIndex;

/// Pretty-printed JSON at a fixed path. Saves write to a sibling temp file
/// and atomically replace the destination, so a failed save never corrupts
/// a previously persisted artifact.
pub struct FsIndexStore {
    path: PathBuf,
}

impl FsIndexStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IndexStore for FsIndexStore {
    fn load(&self) -> Result<Option<RagIndex>> {
        if !self.path.exists() {
            warn!(path = %self.path.display(), "index not found; run ragfolio-indexer to create it");
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| Error::IndexUnavailable(format!("{}: {}", self.path.display(), e)))?;
        let index: RagIndex = serde_json::from_str(&raw)
            .map_err(|e| Error::IndexUnavailable(format!("{}: {}", self.path.display(), e)))?;
        Ok(Some(index))
    }

    fn save(&self, index: &RagIndex) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating index directory {}", dir.display()))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)
            .map_err(|e| Error::Persist(e.to_string()))?;
        let payload = serde_json::to_string_pretty(index)
            .map_err(|e| Error::Persist(e.to_string()))?;
        tmp.write_all(payload.as_bytes())
            .map_err(|e| Error::Persist(e.to_string()))?;
        tmp.persist(&self.path)
            .map_err(|e| Error::Persist(e.to_string()))?;
        Ok(())
    }
}
