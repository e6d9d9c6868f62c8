//! Extractive summarization with the Luhn significance heuristic.
//!
//! Significant words are non-stop words that occur more than once in the
//! document. Each sentence is scanned for chunks: a chunk opens at a
//! significant word and closes once the last [`MAX_GAP`] words were all
//! insignificant. A chunk rates `significant² / length` (trailing
//! insignificant words dropped), a sentence rates its best chunk.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::sentences::{split_sentences, words};
use super::stopwords::is_stop_word;

/// Default number of sentences in an extractive summary.
pub const DEFAULT_SENTENCE_COUNT: usize = 5;

/// Insignificant words allowed inside a chunk before it closes.
const MAX_GAP: usize = 4;

/// Luhn extractive summarizer.
#[derive(Debug, Clone, Copy)]
pub struct ExtractiveSummarizer {
    sentence_count: usize,
}

impl ExtractiveSummarizer {
    /// Create a summarizer selecting `sentence_count` sentences.
    pub fn new(sentence_count: usize) -> Self {
        Self { sentence_count }
    }

    /// Number of sentences selected.
    pub fn sentence_count(&self) -> usize {
        self.sentence_count
    }

    /// Summarize `text`; see [`extract_summary`].
    pub fn summarize(&self, text: &str) -> String {
        extract_summary(text, self.sentence_count)
    }
}

impl Default for ExtractiveSummarizer {
    fn default() -> Self {
        Self::new(DEFAULT_SENTENCE_COUNT)
    }
}

/// Select the `n` best-rated sentences and join them, in document order,
/// with single spaces.
///
/// Documents with fewer than `n` sentences are returned whole; text with no
/// sentences yields an empty string.
pub fn extract_summary(text: &str, n: usize) -> String {
    let sentences = split_sentences(text);
    if sentences.is_empty() || n == 0 {
        return String::new();
    }

    let sentence_words: Vec<Vec<String>> = sentences.iter().map(|s| words(s)).collect();
    let significant = significant_words(&sentence_words);
    let ratings: Vec<f64> = sentence_words
        .iter()
        .map(|w| rate_sentence(w, &significant))
        .collect();

    let mut ranked: Vec<usize> = (0..sentences.len()).collect();
    // Stable sort: equal ratings keep document order.
    ranked.sort_by(|a, b| ratings[*b].total_cmp(&ratings[*a]));
    let mut selected: Vec<usize> = ranked.into_iter().take(n).collect();
    selected.sort_unstable();

    debug!(
        sentences = sentences.len(),
        significant = significant.len(),
        selected = selected.len(),
        "Extractive summary ranked"
    );

    selected
        .into_iter()
        .map(|i| sentences[i].as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Non-stop words occurring more than once across the document.
fn significant_words(sentence_words: &[Vec<String>]) -> HashSet<String> {
    let mut frequencies: HashMap<&str, usize> = HashMap::new();
    for word in sentence_words.iter().flatten() {
        if !is_stop_word(word) {
            *frequencies.entry(word.as_str()).or_insert(0) += 1;
        }
    }

    frequencies
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(word, _)| word.to_string())
        .collect()
}

/// Best chunk rating of a sentence, 0 when it has no chunk.
fn rate_sentence(words: &[String], significant: &HashSet<String>) -> f64 {
    chunks(words, significant)
        .iter()
        .map(|chunk| rate_chunk(chunk))
        .fold(0.0, f64::max)
}

/// Significance masks of the chunks in a sentence.
fn chunks(words: &[String], significant: &HashSet<String>) -> Vec<Vec<bool>> {
    let mut chunks: Vec<Vec<bool>> = Vec::new();
    let mut in_chunk = false;

    for word in words {
        let is_significant = significant.contains(word);
        if is_significant && !in_chunk {
            in_chunk = true;
            chunks.push(vec![true]);
        } else if in_chunk {
            if let Some(chunk) = chunks.last_mut() {
                chunk.push(is_significant);
            }
        }

        if let Some(chunk) = chunks.last() {
            if chunk.len() >= MAX_GAP && chunk[chunk.len() - MAX_GAP..].iter().all(|s| !s) {
                in_chunk = false;
            }
        }
    }

    chunks
}

fn rate_chunk(chunk: &[bool]) -> f64 {
    let end = chunk.iter().rposition(|s| *s).map_or(0, |i| i + 1);
    let chunk = &chunk[..end];
    let significant = chunk.iter().filter(|s| **s).count();
    if significant <= 1 {
        return 0.0;
    }
    (significant * significant) as f64 / chunk.len() as f64
}
