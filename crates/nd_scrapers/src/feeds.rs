//! Syndication feed ingestion.
//!
//! Sources are read one after another through the [`Fetcher`] seam and parsed
//! with `feed-rs`; a source that cannot be read or parsed is logged and skipped.
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use feed_rs::model::Entry;
use feed_rs::parser;
use futures::stream::{self, Stream, StreamExt};
use nd_core::{Error, FeedEntry, Fetcher, Result};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const OFFSET_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%a, %d %b %Y %H:%M %z",
    "%d %b %Y %H:%M:%S %z",
];

const NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%a, %d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M:%S",
];

const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%d %b %Y", "%B %d, %Y"];

/// Parse a feed timestamp. Values without an offset are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for layout in OFFSET_LAYOUTS {
        if let Ok(dt) = DateTime::parse_from_str(value, layout) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, layout) {
            return Some(naive.and_utc());
        }
    }
    for layout in DATE_LAYOUTS {
        if let Ok(date) = NaiveDate::parse_from_str(value, layout) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }
    None
}

/// Parse one feed document into entries, labelled with the feed title or,
/// failing that, the source identifier.
pub fn parse_feed(source: &str, bytes: &[u8]) -> Result<Vec<FeedEntry>> {
    let parser = parser::Builder::new()
        .timestamp_parser(parse_timestamp)
        .build();
    let feed = parser
        .parse(bytes)
        .map_err(|e| Error::Feed(format!("{source}: {e}")))?;

    let label = feed
        .title
        .as_ref()
        .map(|t| t.content.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| source.to_string());

    let mut entries = Vec::with_capacity(feed.entries.len());
    for entry in feed.entries {
        match to_feed_entry(entry, &label) {
            Some(entry) => entries.push(entry),
            None => debug!(source, "skipping entry without a link"),
        }
    }
    Ok(entries)
}

fn to_feed_entry(entry: Entry, source: &str) -> Option<FeedEntry> {
    let link = entry
        .links
        .iter()
        .find(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
        .or_else(|| entry.links.first())
        .map(|l| l.href.trim().to_string())
        .filter(|href| !href.is_empty())?;

    let raw = raw_record(&entry);

    let mut tags: Vec<String> = Vec::new();
    for category in &entry.categories {
        let term = Some(category.term.trim())
            .filter(|t| !t.is_empty())
            .or_else(|| category.label.as_deref().map(str::trim).filter(|l| !l.is_empty()));
        if let Some(term) = term {
            if !tags.iter().any(|t| t == term) {
                tags.push(term.to_string());
            }
        }
    }

    let snippet = entry
        .summary
        .map(|s| s.content)
        .or_else(|| entry.content.and_then(|c| c.body))
        .unwrap_or_default();

    Some(FeedEntry {
        title: entry.title.map(|t| t.content).unwrap_or_default(),
        link,
        snippet,
        published: entry.published.or(entry.updated),
        tags,
        source: source.to_string(),
        raw,
    })
}

fn raw_record(entry: &Entry) -> Value {
    json!({
        "id": entry.id,
        "title": entry.title.as_ref().map(|t| t.content.clone()),
        "links": entry.links.iter().map(|l| l.href.clone()).collect::<Vec<_>>(),
        "summary": entry.summary.as_ref().map(|s| s.content.clone()),
        "authors": entry.authors.iter().map(|p| p.name.clone()).collect::<Vec<_>>(),
        "categories": entry.categories.iter().map(|c| c.term.clone()).collect::<Vec<_>>(),
        "published": entry.published.map(|d| d.to_rfc3339()),
        "updated": entry.updated.map(|d| d.to_rfc3339()),
    })
}

pub struct FeedReader {
    fetcher: Arc<dyn Fetcher>,
    timeout: Duration,
}

impl FeedReader {
    pub fn new(fetcher: Arc<dyn Fetcher>, timeout: Duration) -> Self {
        Self { fetcher, timeout }
    }

    pub async fn read_source(&self, source: &str) -> Result<Vec<FeedEntry>> {
        let body = self.fetcher.fetch(source, self.timeout).await?;
        parse_feed(source, body.as_bytes())
    }

    /// Lazily yield entries source by source, keeping each feed's own order.
    pub fn entries<'a>(&'a self, sources: &'a [String]) -> impl Stream<Item = FeedEntry> + 'a {
        stream::iter(sources)
            .then(move |source| async move {
                match self.read_source(source).await {
                    Ok(entries) => {
                        debug!(source = %source, count = entries.len(), "feed read");
                        entries
                    }
                    Err(e) => {
                        warn!(source = %source, error = %e, "skipping unreadable feed");
                        Vec::new()
                    }
                }
            })
            .flat_map(stream::iter)
    }
}
