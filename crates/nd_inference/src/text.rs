//! Sentence splitting and tokenization.
//!
//! Both are heuristics: the splitter breaks after `.`, `!` or `?` when the next
//! non-space character is an uppercase Latin/Cyrillic letter or a digit, so
//! abbreviations such as "Dr. Smith" are split too.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref BOUNDARY: Regex = Regex::new(r"[.!?](\s+)[A-ZА-Я0-9]").unwrap();
    static ref TOKEN: Regex = Regex::new(r"[a-zA-Zа-яА-Я0-9']+").unwrap();
}

/// Split text into sentences with whitespace collapsed to single spaces.
pub fn split_sentences(text: &str) -> Vec<String> {
    let cleaned = WHITESPACE.replace_all(text.trim(), " ");
    if cleaned.is_empty() {
        return Vec::new();
    }

    let mut sentences = Vec::new();
    let mut start = 0;
    for caps in BOUNDARY.captures_iter(&cleaned) {
        let Some(gap) = caps.get(1) else { continue };
        sentences.push(&cleaned[start..gap.start()]);
        start = gap.end();
    }
    sentences.push(&cleaned[start..]);

    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lower-cased word tokens; apostrophes stay inside tokens.
pub fn tokenize(sentence: &str) -> Vec<String> {
    let lowered = sentence.to_lowercase();
    TOKEN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Collapse whitespace and cut at a word boundary so the result, placeholder
/// included, fits in `width` characters.
pub fn shorten(text: &str, width: usize, placeholder: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= width {
        return collapsed;
    }

    let budget = width.saturating_sub(placeholder.chars().count());
    let mut out = String::new();
    let mut out_len = 0;
    for word in collapsed.split(' ') {
        let word_len = word.chars().count();
        let needed = if out.is_empty() { word_len } else { out_len + 1 + word_len };
        if needed > budget {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
        out_len = needed;
    }
    if out.is_empty() {
        out = collapsed.chars().take(budget).collect();
    }
    out.push_str(placeholder);
    out
}
