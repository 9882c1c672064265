use std::env;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use ragfolio_core::config::Config;
use ragfolio_search::{SearchEngine, SearchOptions};
use ragfolio_index::FsIndexStore;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <query> [--mode general|projects|resume] [--top-k N] [--min-score X] [--index <path>]", args[0]);
        eprintln!("Example: {} 'booking platform' --mode projects --top-k 5", args[0]);
        std::process::exit(1);
    }
    let query = &args[1];
    let mut options = SearchOptions::default();
    let mut index_path: Option<PathBuf> = None;
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--mode" => {
                if i + 1 >= args.len() { eprintln!("Error: --mode requires a value"); std::process::exit(1); }
                options.mode = args[i + 1].parse()?; i += 1;
            }
            "--top-k" => {
                if i + 1 >= args.len() { eprintln!("Error: --top-k requires a number"); std::process::exit(1); }
                options.top_k = args[i + 1].parse()?; i += 1;
            }
            "--min-score" => {
                if i + 1 >= args.len() { eprintln!("Error: --min-score requires a number"); std::process::exit(1); }
                options.min_score = args[i + 1].parse()?; i += 1;
            }
            "--index" => {
                if i + 1 >= args.len() { eprintln!("Error: --index requires a path"); std::process::exit(1); }
                index_path = Some(PathBuf::from(&args[i + 1])); i += 1;
            }
            other => { eprintln!("Unknown flag: {}", other); std::process::exit(1); }
        }
        i += 1;
    }
    let index_path = index_path.unwrap_or_else(|| {
        let path: String = Config::load()
            .and_then(|c| c.get("index.path"))
            .unwrap_or_else(|_| "data/rag.json".to_string());
        PathBuf::from(path)
    });

    println!("🔍 ragfolio search\n==================");
    println!("Query: {}", query);
    println!("Index: {}", index_path.display());

    let engine = SearchEngine::from_store(&FsIndexStore::new(&index_path));
    if !engine.is_ready() {
        println!("\nNo index loaded. Run ragfolio-indexer first; returning no results.");
    }
    let response = engine.search(query, &options);

    println!("\n🔍 Found {} results in {:.2} ms", response.total_results, response.search_time_ms);
    for (i, result) in response.results.iter().enumerate() {
        println!(
            "\n  {}. score={:.4}  relevance={:?}  id={}  source={}",
            i + 1, result.score, result.relevance, result.chunk.id, result.chunk.source
        );
        println!("     📝 {}: {}", result.chunk.title, snippet(&result.chunk.content, 160));
    }
    if !response.context.is_empty() {
        println!("\n--- context ---\n{}", response.context);
    }
    if !response.sources.is_empty() {
        println!("\n📚 Sources: {}", response.sources.join(", "));
    }
    Ok(())
}

fn snippet(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &text[..end])
}
