use std::collections::BTreeSet;

/// Case-insensitive keyword gate applied to feed entries before any fetch.
///
/// Matching is plain substring search over `title + " " + snippet`, so a short
/// phrase like `ai` also matches "air" or "paid".
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordFilter {
    keywords: Vec<String>,
}

impl KeywordFilter {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords: BTreeSet<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self {
            keywords: keywords.into_iter().collect(),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn matches(&self, title: &str, snippet: &str) -> bool {
        let haystack = format!("{title} {snippet}").to_lowercase();
        self.keywords.iter().any(|k| haystack.contains(k.as_str()))
    }
}
