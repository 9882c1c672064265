use std::env;
use std::path::PathBuf;

// Build a portfolio index from a content directory and persist it.
// Usage:
//   cargo run -p ragfolio-index --example build_index -- [content_dir] [out_path]
// Notes:
//   - content_dir defaults to ./content, out_path to ./data/rag.json
//   - the save is atomic; an existing artifact survives a failed write.

fn main() -> anyhow::Result<()> {
    use ragfolio_core::traits::IndexStore;

    let args: Vec<String> = env::args().skip(1).collect();
    let content_dir = args.first().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("content"));
    let out_path = args.get(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("data/rag.json"));

    let index = ragfolio_index::IndexBuilder::for_content_dir(&content_dir).build();
    println!(
        "built {} chunks / {} terms from {:?}",
        index.metadata.total_chunks,
        index.vocabulary.len(),
        index.metadata.sources
    );
    ragfolio_index::FsIndexStore::new(&out_path).save(&index)?;
    println!("saved to {}", out_path.display());
    Ok(())
}
