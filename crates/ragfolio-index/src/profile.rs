//! Structured profile source.
//!
//! Reads `profile.json` and synthesizes one natural-language chunk per
//! logical facet: basic info, each experience entry, the skills list, each
//! education entry. Field access is best-effort; absent fields default to
//! empty rather than failing the source.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use ragfolio_core::error::Error;
use ragfolio_core::tokenize::tokenize;
use ragfolio_core::traits::ChunkSource;
use ragfolio_core::types::{ChunkKind, ContentChunk, Meta};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub headline: String,
    pub location: String,
    pub summary: String,
    pub experience: Vec<Experience>,
    pub skills: Vec<String>,
    pub education: Vec<Education>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub dates: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub program: String,
    pub school: String,
    pub dates: String,
    pub notes: String,
}

pub struct ProfileSource {
    path: PathBuf,
    source_name: String,
}

impl ProfileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let source_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "profile.json".to_string());
        Self { path, source_name }
    }

    fn chunk(&self, id: String, title: String, content: String, metadata: Meta) -> ContentChunk {
        ContentChunk {
            id,
            kind: ChunkKind::Profile,
            title,
            tokens: tokenize(&content),
            content,
            metadata,
            source: self.source_name.clone(),
            slug: None,
        }
    }
}

impl ChunkSource for ProfileSource {
    fn name(&self) -> &str {
        &self.source_name
    }

    fn load(&self) -> Result<Vec<ContentChunk>> {
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            Error::SourceUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        let profile: Profile = serde_json::from_str(&raw)
            .with_context(|| format!("malformed profile at {}", self.path.display()))?;

        let mut chunks = Vec::new();

        let basic = format!(
            "{} is a {}. Located in {}. {}",
            profile.name, profile.headline, profile.location, profile.summary
        );
        chunks.push(self.chunk(
            "profile-basic".to_string(),
            "Basic Information".to_string(),
            basic,
            object_meta(&profile),
        ));

        for (i, exp) in profile.experience.iter().enumerate() {
            let text = format!(
                "{} at {} ({}). {}",
                exp.title,
                exp.company,
                exp.dates,
                exp.highlights.join(". ")
            );
            chunks.push(self.chunk(
                format!("profile-exp-{}", i),
                format!("Experience: {}", exp.title),
                text,
                object_meta(exp),
            ));
        }

        if !profile.skills.is_empty() {
            let text = format!("Technical skills: {}", profile.skills.join(", "));
            let mut meta = Meta::new();
            meta.insert(
                "skills".to_string(),
                serde_json::Value::from(profile.skills.clone()),
            );
            chunks.push(self.chunk(
                "profile-skills".to_string(),
                "Technical Skills".to_string(),
                text,
                meta,
            ));
        }

        for (i, edu) in profile.education.iter().enumerate() {
            let text = format!(
                "{} at {} ({}). {}",
                edu.program, edu.school, edu.dates, edu.notes
            );
            chunks.push(self.chunk(
                format!("profile-edu-{}", i),
                format!("Education: {}", edu.program),
                text,
                object_meta(edu),
            ));
        }

        Ok(chunks)
    }
}

/// Serialize any value into the loose metadata bag, dropping anything that
/// does not form a JSON object.
fn object_meta<T: Serialize>(value: &T) -> Meta {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::Object(map)) => map.into_iter().collect(),
        _ => Meta::new(),
    }
}
