use std::env;
use std::path::PathBuf;
use std::time::Duration;

use indicatif::ProgressBar;
use tracing_subscriber::EnvFilter;

use ragfolio_core::config::Config;
use ragfolio_core::traits::IndexStore;
use ragfolio_index::{FsIndexStore, IndexBuilder};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let args: Vec<String> = env::args().skip(1).collect();
    let mut content_dir = None;
    let mut out_path = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--out" | "-o" => {
                if i + 1 >= args.len() { eprintln!("Error: --out requires a path"); std::process::exit(1); }
                out_path = Some(PathBuf::from(&args[i + 1])); i += 1;
            }
            _ if !args[i].starts_with('-') => content_dir = Some(PathBuf::from(&args[i])),
            other => { eprintln!("Unknown flag: {}", other); std::process::exit(1); }
        }
        i += 1;
    }
    let content_dir = content_dir.unwrap_or_else(|| {
        let dir: String = config.get("content.dir").unwrap_or_else(|_| "content".to_string());
        PathBuf::from(dir)
    });
    let out_path = out_path.unwrap_or_else(|| {
        let path: String = config.get("index.path").unwrap_or_else(|_| "data/rag.json".to_string());
        PathBuf::from(path)
    });

    println!("ragfolio indexer\n================");
    println!("Content directory: {}", content_dir.display());
    println!("Index output: {}", out_path.display());

    let pb = ProgressBar::new_spinner();
    pb.set_message("chunking content and computing TF-IDF model...");
    pb.enable_steady_tick(Duration::from_millis(100));
    let index = IndexBuilder::for_content_dir(&content_dir).build();
    pb.finish_and_clear();

    if index.chunks.is_empty() {
        eprintln!("⚠️  No chunks produced; check that {} exists", content_dir.display());
    }

    let store = FsIndexStore::new(&out_path);
    store.save(&index)?;

    println!("\n✅ Index built and saved to {}", out_path.display());
    println!("📊 Total chunks: {}", index.metadata.total_chunks);
    println!("📊 Vocabulary size: {}", index.vocabulary.len());
    println!("📊 Sources: {}", index.metadata.sources.join(", "));
    println!("\n💡 To search, use: cargo run --bin ragfolio-search '<query>'");
    Ok(())
}
