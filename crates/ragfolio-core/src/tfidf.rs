//! TF-IDF model math: vocabulary + IDF table over a corpus, dense vector
//! projection, cosine scoring.

use std::collections::{HashMap, HashSet};

use crate::types::ContentChunk;

/// Global term statistics computed once at build time.
///
/// `vocabulary` is ordered by first appearance across the corpus so that
/// rebuilds of identical input produce identical, positionally-comparable
/// vectors. `idf` has an entry for every vocabulary term.
#[derive(Debug, Clone)]
pub struct TfidfModel {
    pub vocabulary: Vec<String>,
    pub idf: HashMap<String, f64>,
}

/// Build the vocabulary and IDF table from the stored tokens of `chunks`.
///
/// `idf[term] = ln(total_chunks / document_frequency(term))`. Document
/// frequency counts chunks containing the term at least once and is >= 1
/// for every vocabulary term by construction.
pub fn build_model(chunks: &[ContentChunk]) -> TfidfModel {
    let mut vocabulary: Vec<String> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut document_freq: HashMap<String, usize> = HashMap::new();

    for chunk in chunks {
        let mut in_chunk: HashSet<&str> = HashSet::new();
        for token in &chunk.tokens {
            if seen.insert(token.as_str()) {
                vocabulary.push(token.clone());
            }
            if in_chunk.insert(token.as_str()) {
                *document_freq.entry(token.clone()).or_insert(0) += 1;
            }
        }
    }

    let total_docs = chunks.len() as f64;
    let idf = vocabulary
        .iter()
        .map(|term| {
            let df = document_freq.get(term).copied().unwrap_or(1) as f64;
            (term.clone(), (total_docs / df).ln())
        })
        .collect();

    TfidfModel { vocabulary, idf }
}

/// Project a token sequence into the dense TF-IDF space of `vocabulary`.
///
/// `weight = tf(term) * idf[term]`; tokens outside the vocabulary contribute
/// nothing and do not extend the vector.
pub fn project(tokens: &[String], vocabulary: &[String], idf: &HashMap<String, f64>) -> Vec<f64> {
    let mut term_freq: HashMap<&str, usize> = HashMap::new();
    for token in tokens {
        *term_freq.entry(token.as_str()).or_insert(0) += 1;
    }
    vocabulary
        .iter()
        .map(|term| {
            let tf = term_freq.get(term.as_str()).copied().unwrap_or(0) as f64;
            tf * idf.get(term).copied().unwrap_or(0.0)
        })
        .collect()
}

/// Cosine similarity of two equal-length vectors, 0.0 when either has zero
/// magnitude or the lengths differ.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
