use std::fs;
use std::path::Path;

use tempfile::TempDir;

use ragfolio_core::traits::{ChunkSource, IndexStore};
use ragfolio_core::types::ChunkKind;
use ragfolio_index::{FsIndexStore, IndexBuilder, ProfileSource, ProjectsSource};

const PROFILE_JSON: &str = r#"{
  "name": "Suryadi Zhang",
  "headline": "Full-Stack Software Engineer",
  "location": "Jakarta, Indonesia",
  "summary": "Builds web products end to end, from database schema to deployment.",
  "experience": [
    {
      "title": "Software Engineer",
      "company": "Freightify",
      "dates": "2022 - Present",
      "highlights": ["Shipped a rate-search API used by forwarders", "Cut page load times in half"]
    },
    {
      "title": "Backend Developer",
      "company": "Logistics Co",
      "dates": "2020 - 2022",
      "highlights": ["Automated customs document processing"]
    }
  ],
  "skills": ["React", "Next.js", "Python", "FastAPI", "PostgreSQL"],
  "education": [
    {
      "program": "B.Sc. Computer Science",
      "school": "Institut Teknologi",
      "dates": "2016 - 2020",
      "notes": "Graduated with honors"
    }
  ]
}"#;

const PROJECT_MDX: &str = "---\ntitle: Booking Platform\ndescription: A booking platform for appointment scheduling\nlongDescription: Real-time availability, reminders, and payments in one place\ntags:\n  - Next.js\n  - FastAPI\n  - PostgreSQL\nfeatured: true\nyear: 2024\n---\n\nThe booking engine keeps every appointment slot in PostgreSQL and exposes them through a FastAPI service that the Next.js frontend polls for availability. Conflicts are resolved optimistically so two clients cannot book the same slot even under concurrent load.\n";

fn write_content(dir: &Path) {
    fs::write(dir.join("profile.json"), PROFILE_JSON).expect("write profile");
    fs::create_dir_all(dir.join("projects")).expect("mkdir projects");
    fs::write(dir.join("projects/booking-platform.mdx"), PROJECT_MDX).expect("write project");
}

#[test]
fn profile_source_synthesizes_one_chunk_per_facet() {
    let tmp = TempDir::new().expect("tempdir");
    write_content(tmp.path());

    let chunks = ProfileSource::new(tmp.path().join("profile.json"))
        .load()
        .expect("load profile");

    let ids: Vec<&str> = chunks.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["profile-basic", "profile-exp-0", "profile-exp-1", "profile-skills", "profile-edu-0"]
    );
    assert!(chunks.iter().all(|c| c.kind == ChunkKind::Profile));
    assert!(chunks.iter().all(|c| c.slug.is_none()));

    let basic = &chunks[0];
    assert_eq!(basic.title, "Basic Information");
    assert!(basic
        .content
        .starts_with("Suryadi Zhang is a Full-Stack Software Engineer. Located in Jakarta"));

    let exp = &chunks[1];
    assert_eq!(exp.title, "Experience: Software Engineer");
    assert!(exp.content.contains("at Freightify (2022 - Present)"));
    assert!(exp.content.contains("Shipped a rate-search API"));

    let skills = &chunks[3];
    assert_eq!(skills.content, "Technical skills: React, Next.js, Python, FastAPI, PostgreSQL");
}

#[test]
fn project_source_emits_overview_tech_and_sections() {
    let tmp = TempDir::new().expect("tempdir");
    write_content(tmp.path());

    let chunks = ProjectsSource::new(tmp.path().join("projects"))
        .load()
        .expect("load projects");

    assert!(chunks.len() >= 3, "overview + tech + at least one section");
    let overview = &chunks[0];
    assert_eq!(overview.id, "project-booking-platform-overview");
    assert_eq!(overview.kind, ChunkKind::Project);
    assert_eq!(overview.title, "Booking Platform");
    assert_eq!(overview.slug.as_deref(), Some("booking-platform"));
    assert!(overview.content.starts_with("Booking Platform: A booking platform"));
    assert_eq!(
        overview.metadata.get("featured").and_then(|v| v.as_bool()),
        Some(true)
    );

    let tech = &chunks[1];
    assert_eq!(tech.id, "project-booking-platform-tech");
    assert_eq!(tech.title, "Booking Platform - Technology Stack");
    assert_eq!(
        tech.content,
        "Booking Platform is built with: Next.js, FastAPI, PostgreSQL"
    );

    let section = &chunks[2];
    assert_eq!(section.id, "project-booking-platform-content-0");
    assert_eq!(section.kind, ChunkKind::Section);
    assert_eq!(section.title, "Booking Platform - Section 1");
    assert_eq!(section.metadata.get("section").and_then(|v| v.as_u64()), Some(1));
    assert!(!section.content.starts_with("---"), "front matter must not leak into the body");
}

#[test]
fn project_without_tags_has_no_tech_chunk() {
    let tmp = TempDir::new().expect("tempdir");
    fs::create_dir_all(tmp.path().join("projects")).expect("mkdir");
    fs::write(
        tmp.path().join("projects/plain.md"),
        "---\ntitle: Plain Project\ndescription: No tag list here\n---\n\nA body sentence that is comfortably longer than the minimum chunk length threshold of the chunker.\n",
    )
    .expect("write");

    let chunks = ProjectsSource::new(tmp.path().join("projects")).load().expect("load");
    assert!(chunks.iter().all(|c| !c.id.ends_with("-tech")));
}

#[test]
fn missing_profile_still_builds_a_partial_index() {
    let tmp = TempDir::new().expect("tempdir");
    write_content(tmp.path());
    fs::remove_file(tmp.path().join("profile.json")).expect("remove profile");

    let index = IndexBuilder::for_content_dir(tmp.path()).build();
    assert!(!index.chunks.is_empty(), "project chunks survive a missing profile");
    assert!(index.chunks.iter().all(|c| c.kind != ChunkKind::Profile));
    assert_eq!(index.metadata.total_chunks, index.chunks.len());
}

#[test]
fn malformed_profile_is_recovered_as_empty_source() {
    let tmp = TempDir::new().expect("tempdir");
    write_content(tmp.path());
    fs::write(tmp.path().join("profile.json"), "{ not json").expect("corrupt profile");

    let index = IndexBuilder::for_content_dir(tmp.path()).build();
    assert!(index.chunks.iter().all(|c| c.kind != ChunkKind::Profile));
    assert!(index.chunks.iter().any(|c| c.kind == ChunkKind::Project));
}

#[test]
fn built_index_covers_every_token_with_idf() {
    let tmp = TempDir::new().expect("tempdir");
    write_content(tmp.path());

    let index = IndexBuilder::for_content_dir(tmp.path()).build();
    assert_eq!(index.metadata.total_chunks, index.chunks.len());
    assert_eq!(index.metadata.sources, vec!["profile.json", "booking-platform.mdx"]);
    for chunk in &index.chunks {
        for token in &chunk.tokens {
            assert!(index.idf.contains_key(token), "no idf entry for {}", token);
        }
    }
    assert_eq!(index.vocabulary.len(), index.idf.len());
}

#[test]
fn store_round_trips_and_reports_missing_index_as_none() {
    let tmp = TempDir::new().expect("tempdir");
    write_content(tmp.path());
    let index = IndexBuilder::for_content_dir(tmp.path()).build();

    let store = FsIndexStore::new(tmp.path().join("data/rag.json"));
    assert!(store.load().expect("load before save").is_none());

    store.save(&index).expect("save");
    let loaded = store.load().expect("load").expect("index present");
    assert_eq!(loaded.chunks.len(), index.chunks.len());
    assert_eq!(loaded.vocabulary, index.vocabulary);
    assert_eq!(loaded.metadata.total_chunks, index.metadata.total_chunks);
}

#[test]
fn artifact_wire_shape_matches_the_contract() {
    let tmp = TempDir::new().expect("tempdir");
    write_content(tmp.path());
    let index = IndexBuilder::for_content_dir(tmp.path()).build();

    let json = serde_json::to_value(&index).expect("serialize");
    assert_eq!(json["chunks"][0]["type"], "profile");
    assert!(json["chunks"][0].get("slug").is_none(), "profile chunks carry no slug");
    assert!(json["metadata"]["createdAt"].is_string());
    assert!(json["metadata"]["totalChunks"].is_number());
    assert!(json["vocabulary"].is_array());
    assert!(json["idf"].is_object());
}
