use std::fs;
use std::path::Path;

use tempfile::TempDir;

use ragfolio_core::traits::IndexStore;
use ragfolio_core::types::ChunkKind;
use ragfolio_index::{FsIndexStore, IndexBuilder};
use ragfolio_search::{SearchEngine, SearchMode, SearchOptions};

fn write_content(dir: &Path) {
    fs::write(
        dir.join("profile.json"),
        r#"{
          "name": "Suryadi Zhang",
          "headline": "Full-Stack Software Engineer",
          "location": "Jakarta, Indonesia",
          "summary": "Ships booking and logistics products with React, Next.js, Python and FastAPI.",
          "experience": [
            {"title": "Software Engineer", "company": "Freightify", "dates": "2022 - Present",
             "highlights": ["Built FastAPI services for rate search"]}
          ],
          "skills": ["React", "Next.js", "Python", "FastAPI"],
          "education": []
        }"#,
    )
    .expect("write profile");

    let projects = dir.join("projects");
    fs::create_dir_all(&projects).expect("mkdir projects");
    fs::write(
        projects.join("booking-platform.mdx"),
        "---\ntitle: Booking Platform\ndescription: Appointment scheduling with live availability\ntags:\n  - Next.js\n  - FastAPI\nfeatured: true\nyear: 2024\n---\n\nThe scheduling core exposes a FastAPI service backed by PostgreSQL and streams availability updates to the Next.js client over server-sent events without ever double-booking a slot.\n",
    )
    .expect("write booking");
    fs::write(
        projects.join("weather-cli.md"),
        "---\ntitle: Weather CLI\ndescription: Terminal dashboard for hourly forecasts\ntags:\n  - Rust\n---\n\nA terminal client that renders hourly forecast panels from open meteorological data, cached locally so repeated lookups stay fast even when the upstream service is slow.\n",
    )
    .expect("write weather");
}

#[test]
fn build_save_load_search() {
    let tmp = TempDir::new().expect("tempdir");
    write_content(tmp.path());

    let index = IndexBuilder::for_content_dir(tmp.path()).build();
    assert!(index.metadata.total_chunks >= 6, "profile facets + two projects");

    let store = FsIndexStore::new(tmp.path().join("data/rag.json"));
    store.save(&index).expect("save index");

    let engine = SearchEngine::from_store(&store);
    assert!(engine.is_ready());

    let response = engine.search("FastAPI booking", &SearchOptions::default());
    assert!(response.total_results > 0);
    assert_eq!(response.results[0].chunk.slug.as_deref(), Some("booking-platform"));
    assert!(response.context.contains("Booking Platform"));
    assert!(response.sources.contains(&"booking-platform.mdx".to_string()));
    assert!(response.search_time_ms >= 0.0);

    // resume mode keeps profile chunks and only the featured project
    let resume = engine.search(
        "FastAPI booking weather",
        &SearchOptions { mode: SearchMode::Resume, min_score: 0.0, ..Default::default() },
    );
    assert!(!resume.results.is_empty());
    for r in &resume.results {
        assert_ne!(r.chunk.kind, ChunkKind::Section);
        if r.chunk.kind == ChunkKind::Project {
            assert_eq!(r.chunk.slug.as_deref(), Some("booking-platform"));
        }
    }

    let projects = engine.projects();
    assert_eq!(projects.len(), 2);
    assert!(projects.iter().any(|p| p.slug == "weather-cli"));
}

#[test]
fn missing_index_degrades_to_empty_response() {
    let tmp = TempDir::new().expect("tempdir");
    let store = FsIndexStore::new(tmp.path().join("data/rag.json"));

    let engine = SearchEngine::from_store(&store);
    assert!(!engine.is_ready());

    let response = engine.search("anything", &SearchOptions::default());
    assert_eq!(response.results.len(), 0);
    assert_eq!(response.total_results, 0);
    assert_eq!(response.context, "");
    assert!(response.sources.is_empty());
    assert!(engine.projects().is_empty());
    assert!(engine.find_similar("profile-basic", 5).is_empty());
}

#[test]
fn corrupt_index_degrades_to_empty_response() {
    let tmp = TempDir::new().expect("tempdir");
    let path = tmp.path().join("data/rag.json");
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(&path, "{ definitely not an index").expect("write garbage");

    let engine = SearchEngine::from_store(&FsIndexStore::new(&path));
    assert!(!engine.is_ready());
    let response = engine.search("anything", &SearchOptions::default());
    assert_eq!(response.total_results, 0);
}
