//! Project document source.
//!
//! Walks the projects directory for `.md`/`.mdx` files. Each file carries
//! YAML front matter between `---` lines followed by the body. Per project
//! this emits an overview chunk, a technology-stack chunk when the front
//! matter declares tags, and one section chunk per body piece produced by
//! the shared chunker.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::warn;

use ragfolio_core::chunking::{split_text, ChunkingConfig};
use ragfolio_core::error::Error;
use ragfolio_core::tokenize::tokenize;
use ragfolio_core::traits::ChunkSource;
use ragfolio_core::types::{ChunkKind, ContentChunk, Meta};

type FrontMatter = HashMap<String, serde_yaml::Value>;

pub struct ProjectsSource {
    dir: PathBuf,
    chunking: ChunkingConfig,
}

impl ProjectsSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), chunking: ChunkingConfig::default() }
    }

    pub fn with_chunking(mut self, chunking: ChunkingConfig) -> Self {
        self.chunking = chunking;
        self
    }

    fn list_project_files(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            return Err(Error::SourceUnavailable(format!(
                "projects directory {} does not exist",
                self.dir.display()
            ))
            .into());
        }
        let mut files: Vec<PathBuf> = walkdir::WalkDir::new(&self.dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| {
                matches!(
                    p.extension().and_then(|s| s.to_str()),
                    Some("md") | Some("mdx")
                )
            })
            .collect();
        files.sort();
        Ok(files)
    }

    fn chunks_for_file(&self, path: &Path) -> Result<Vec<ContentChunk>> {
        let raw = fs::read_to_string(path)?;
        let (front_matter, body) = parse_front_matter(&raw);
        let front_matter = front_matter.unwrap_or_default();

        let slug = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "project".to_string());
        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| slug.clone());

        let title = yaml_str(&front_matter, "title").unwrap_or(&slug).to_string();
        let description = yaml_str(&front_matter, "description").unwrap_or("");
        let long_description = yaml_str(&front_matter, "longDescription").unwrap_or("");
        let meta = front_matter_meta(&front_matter);

        let mut chunks = Vec::new();

        let overview = format!("{}: {}. {}", title, description, long_description);
        chunks.push(ContentChunk {
            id: format!("project-{}-overview", slug),
            kind: ChunkKind::Project,
            title: title.clone(),
            tokens: tokenize(&overview),
            content: overview,
            metadata: meta.clone(),
            source: source.clone(),
            slug: Some(slug.clone()),
        });

        let tags = yaml_string_list(&front_matter, "tags");
        if !tags.is_empty() {
            let tech = format!("{} is built with: {}", title, tags.join(", "));
            let mut tech_meta = Meta::new();
            tech_meta.insert("tags".to_string(), serde_json::Value::from(tags));
            tech_meta.insert("title".to_string(), serde_json::Value::from(title.clone()));
            chunks.push(ContentChunk {
                id: format!("project-{}-tech", slug),
                kind: ChunkKind::Project,
                title: format!("{} - Technology Stack", title),
                tokens: tokenize(&tech),
                content: tech,
                metadata: tech_meta,
                source: source.clone(),
                slug: Some(slug.clone()),
            });
        }

        for (i, piece) in split_text(body, &self.chunking).into_iter().enumerate() {
            let mut section_meta = meta.clone();
            section_meta.insert("section".to_string(), serde_json::Value::from(i + 1));
            chunks.push(ContentChunk {
                id: format!("project-{}-content-{}", slug, i),
                kind: ChunkKind::Section,
                title: format!("{} - Section {}", title, i + 1),
                tokens: tokenize(&piece),
                content: piece,
                metadata: section_meta,
                source: source.clone(),
                slug: Some(slug.clone()),
            });
        }

        Ok(chunks)
    }
}

impl ChunkSource for ProjectsSource {
    fn name(&self) -> &str {
        "projects"
    }

    fn load(&self) -> Result<Vec<ContentChunk>> {
        let mut chunks = Vec::new();
        for path in self.list_project_files()? {
            match self.chunks_for_file(&path) {
                Ok(batch) => chunks.extend(batch),
                Err(e) => warn!(file = %path.display(), error = %e, "skipping unreadable project file"),
            }
        }
        Ok(chunks)
    }
}

/// Split YAML front matter (between `---` lines at the start of the file)
/// from the document body.
fn parse_front_matter(content: &str) -> (Option<FrontMatter>, &str) {
    if !content.starts_with("---") {
        return (None, content);
    }
    if let Some(end_idx) = content[3..].find("\n---") {
        let yaml_content = &content[3..3 + end_idx];
        let rest = content[3 + end_idx + 4..].trim_start_matches('-').trim_start();
        if let Ok(front_matter) = serde_yaml::from_str(yaml_content) {
            return (Some(front_matter), rest);
        }
    }
    (None, content)
}

fn yaml_str<'a>(front_matter: &'a FrontMatter, key: &str) -> Option<&'a str> {
    front_matter.get(key).and_then(|v| v.as_str())
}

/// Read a list-valued key; a plain comma-separated string is accepted too.
fn yaml_string_list(front_matter: &FrontMatter, key: &str) -> Vec<String> {
    match front_matter.get(key) {
        Some(serde_yaml::Value::Sequence(seq)) => seq
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        Some(serde_yaml::Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Convert the whole front matter into the loose metadata bag.
fn front_matter_meta(front_matter: &FrontMatter) -> Meta {
    let mut meta = Meta::new();
    for (key, value) in front_matter {
        if let Ok(json) = serde_json::to_value(value) {
            meta.insert(key.clone(), json);
        }
    }
    meta
}
