//! Greedy sentence-packing of long document bodies.

/// Bounds for the chunker.
#[derive(Debug, Clone)]
pub struct ChunkingConfig {
    /// Maximum chunk length in characters.
    pub max_len: usize,
    /// Chunks at or below this length are discarded as too short to be
    /// useful context.
    pub min_len: usize,
    /// Word-group size used when a single sentence exceeds `max_len`.
    pub words_per_piece: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self { max_len: 500, min_len: 50, words_per_piece: 50 }
    }
}

/// Split `text` into chunks of at most `max_len` characters, breaking on
/// sentence boundaries (`.`, `!`, `?`).
///
/// Sentences accumulate into a running buffer; a sentence that would
/// overflow the buffer flushes it first. A sentence that cannot fit in a
/// chunk on its own is split into fixed-size word groups instead of being
/// dropped. Greedy, deterministic, not optimal packing.
pub fn split_text(text: &str, cfg: &ChunkingConfig) -> Vec<String> {
    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();

    for sentence in text.split(['.', '!', '?']) {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }
        if sentence.len() > cfg.max_len {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            let words: Vec<&str> = sentence.split_whitespace().collect();
            for group in words.chunks(cfg.words_per_piece) {
                chunks.push(group.join(" "));
            }
            continue;
        }
        let needed = sentence.len() + usize::from(!current.is_empty());
        if current.len() + needed > cfg.max_len {
            chunks.push(std::mem::take(&mut current));
            current.push_str(sentence);
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(sentence);
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    chunks.retain(|c| c.len() > cfg.min_len);
    chunks
}
