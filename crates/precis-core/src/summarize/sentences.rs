//! English sentence and word tokenization.
//!
//! Paragraphs are separated by blank lines; whitespace inside a paragraph is
//! collapsed. A line written entirely in upper case is a heading: it is never
//! a sentence and it breaks the text around it. A sentence ends at `.`, `!` or `?` (plus any closing quotes or
//! brackets) followed by whitespace, unless the period closes a known
//! abbreviation or a single-letter initial, or the next word starts in
//! lower case.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ \t\r]*\n").unwrap());

static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\W\d_]+(?:['’-][^\W\d_]+)*").unwrap());

static ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "rev", "gen", "col", "capt", "lt",
        "sgt", "gov", "sen", "rep", "hon", "vs", "etc", "al", "inc", "ltd", "co", "corp", "llc",
        "dept", "univ", "assn", "bros", "fig", "figs", "eq", "no", "nos", "vol", "vols", "pp",
        "ch", "sec", "ed", "eds", "approx", "est", "jan", "feb", "mar", "apr", "jun", "jul",
        "aug", "sep", "sept", "oct", "nov", "dec", "mon", "tue", "wed", "thu", "fri", "sat",
        "sun", "ave", "blvd", "rd", "mt", "ft", "cf", "viz", "ca",
    ]
    .into_iter()
    .collect()
});

const TERMINATORS: [char; 3] = ['.', '!', '?'];
const CLOSERS: [char; 6] = ['"', '\'', ')', ']', '”', '’'];

/// Split text into sentences, in document order.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    for paragraph in PARAGRAPH_BREAK.split(text) {
        let mut block: Vec<&str> = Vec::new();
        for line in paragraph.lines() {
            if is_heading(line) {
                sentences.extend(split_block(&block));
                block.clear();
            } else {
                block.push(line);
            }
        }
        sentences.extend(split_block(&block));
    }
    sentences
}

/// Upper-case letters and no lower-case ones.
fn is_heading(line: &str) -> bool {
    line.chars().any(char::is_uppercase) && !line.chars().any(char::is_lowercase)
}

fn split_block(lines: &[&str]) -> Vec<String> {
    let normalized = lines
        .iter()
        .flat_map(|line| line.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ");
    split_paragraph(&normalized)
}

/// Alphabetic words of a sentence, lower-cased.
pub fn words(sentence: &str) -> Vec<String> {
    WORD.find_iter(sentence)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

fn split_paragraph(paragraph: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = paragraph.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (_, c) = chars[i];
        if !TERMINATORS.contains(&c) {
            i += 1;
            continue;
        }

        // Consume runs like "?!", "..." and closing quotes/brackets.
        let mut end = i + 1;
        while end < chars.len() && TERMINATORS.contains(&chars[end].1) {
            end += 1;
        }
        while end < chars.len() && CLOSERS.contains(&chars[end].1) {
            end += 1;
        }

        let at_end = end == chars.len();
        let before_space = !at_end && chars[end].1 == ' ';
        if !(at_end || before_space) {
            i = end;
            continue;
        }

        let byte_end = if at_end { paragraph.len() } else { chars[end].0 };
        if at_end || is_boundary(paragraph, start, chars[i].0, c, &paragraph[byte_end..]) {
            let sentence = paragraph[start..byte_end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            start = byte_end;
        }
        i = end;
    }

    let rest = paragraph[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest.to_string());
    }
    sentences
}

/// Decide whether the terminator at `term_at` ends the sentence.
fn is_boundary(paragraph: &str, start: usize, term_at: usize, term: char, rest: &str) -> bool {
    let next_word = rest.trim_start();
    if next_word
        .chars()
        .next()
        .map(|c| c.is_lowercase())
        .unwrap_or(false)
    {
        return false;
    }
    if term != '.' {
        return true;
    }

    let preceding = paragraph[start..term_at]
        .rsplit(' ')
        .next()
        .unwrap_or("")
        .trim_start_matches(|c: char| !c.is_alphanumeric());
    if preceding.is_empty() {
        return true;
    }

    let lowered = preceding.to_lowercase();
    let single_initial = lowered.chars().count() == 1 && lowered.chars().all(char::is_alphabetic);
    let dotted = lowered.contains('.');
    !(single_initial || dotted || ABBREVIATIONS.contains(lowered.as_str()))
}
