use std::collections::HashMap;
use nd_core::Summarizer;

use crate::stopwords::is_stop_word;
use crate::text::{split_sentences, tokenize};

/// Extractive summarizer scoring sentences by normalized term frequency.
///
/// Every non-stop word gets a weight `count / max_count`; a sentence scores the
/// sum of its tokens' weights, and the best `N` sentences are returned in their
/// original order.
#[derive(Debug, Default, Clone)]
pub struct FrequencySummarizer;

impl FrequencySummarizer {
    pub fn new() -> Self {
        Self
    }

    fn term_weights(tokenized: &[Vec<String>]) -> HashMap<&str, f64> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for token in tokenized.iter().flatten() {
            if !is_stop_word(token) {
                *counts.entry(token.as_str()).or_insert(0) += 1;
            }
        }
        let max = counts.values().copied().max().unwrap_or(0);
        if max == 0 {
            return HashMap::new();
        }
        counts
            .into_iter()
            .map(|(term, count)| (term, count as f64 / max as f64))
            .collect()
    }
}

impl Summarizer for FrequencySummarizer {
    fn name(&self) -> &str {
        "frequency"
    }

    fn summarize(&self, text: &str, max_sentences: usize) -> String {
        let sentences = split_sentences(text);
        if sentences.len() <= max_sentences {
            return sentences.join(" ");
        }

        let tokenized: Vec<Vec<String>> = sentences.iter().map(|s| tokenize(s)).collect();
        let weights = Self::term_weights(&tokenized);

        // With fewer than two distinct terms there is nothing to rank by.
        if weights.len() < 2 {
            return sentences[..max_sentences].join(" ");
        }

        let mut scored: Vec<(usize, f64)> = tokenized
            .iter()
            .enumerate()
            .map(|(index, tokens)| {
                let score = tokens
                    .iter()
                    .filter_map(|t| weights.get(t.as_str()))
                    .sum::<f64>();
                (index, score)
            })
            .collect();

        // Stable: equal scores keep document order.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        let mut selected: Vec<usize> = scored
            .into_iter()
            .take(max_sentences)
            .map(|(index, _)| index)
            .collect();
        selected.sort_unstable();

        selected
            .into_iter()
            .map(|index| sentences[index].as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
