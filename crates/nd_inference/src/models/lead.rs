use std::fmt;
use nd_core::Summarizer;

use crate::text::split_sentences;

/// Baseline summarizer: the first `N` sentences, unscored.
pub struct LeadSummarizer;

impl fmt::Debug for LeadSummarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeadSummarizer").finish()
    }
}

impl LeadSummarizer {
    pub fn new() -> Self {
        Self
    }
}

impl Summarizer for LeadSummarizer {
    fn name(&self) -> &str {
        "lead"
    }

    fn summarize(&self, text: &str, max_sentences: usize) -> String {
        split_sentences(text)
            .into_iter()
            .take(max_sentences)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
