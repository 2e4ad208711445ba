use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One syndication item as read from a feed, before any filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    /// Feed-supplied summary, possibly HTML, possibly empty.
    pub snippet: String,
    pub published: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    /// Feed title, or the source identifier when the feed has none.
    pub source: String,
    pub raw: serde_json::Value,
}

/// A collected article, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub published_at: Option<DateTime<Utc>>,
    pub source: String,
    pub tags: Vec<String>,
    pub summary: String,
    pub full_text: String,
    #[serde(skip)]
    pub raw: serde_json::Value,
}

impl Article {
    /// Promote a feed entry once its body and summary are resolved.
    pub fn from_entry(entry: FeedEntry, summary: String, full_text: String) -> Self {
        let title = if entry.title.trim().is_empty() {
            "Untitled".to_string()
        } else {
            entry.title
        };
        Self {
            title,
            link: entry.link,
            published_at: entry.published,
            source: entry.source,
            tags: entry.tags,
            summary,
            full_text,
            raw: entry.raw,
        }
    }

    /// Body length in characters, the unit the minimum-length policy uses.
    pub fn body_len(&self) -> usize {
        self.full_text.chars().count()
    }
}

/// Order articles newest first; undated articles sort last, after any date.
pub fn sort_by_recency(articles: &mut [Article]) {
    articles.sort_by(|a, b| match (a.published_at, b.published_at) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
