//! Rendering of collected articles.
//!
//! Both renderers are pure functions over the article list.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::Article;
use crate::Result;

/// Column width the markdown summary is wrapped to.
pub const MARKDOWN_WRAP_WIDTH: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    #[default]
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(format!("unknown output format: {other} (expected json or markdown)")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

pub fn render(format: OutputFormat, articles: &[Article]) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(articles),
        OutputFormat::Markdown => Ok(to_markdown(articles)),
    }
}

/// Pretty JSON array, one record per article; the raw feed record is omitted.
pub fn to_json(articles: &[Article]) -> Result<String> {
    Ok(serde_json::to_string_pretty(articles)?)
}

pub fn to_markdown(articles: &[Article]) -> String {
    let mut lines: Vec<String> = Vec::new();
    for article in articles {
        let mut header = format!("- [{}]({})", article.title, article.link);
        if let Some(published) = article.published_at {
            header.push_str(&format!(" — {}", published.format("%Y-%m-%d %H:%M")));
        }
        if !article.source.is_empty() {
            header.push_str(&format!(" ({})", article.source));
        }
        lines.push(header);
        for line in textwrap::wrap(&article.summary, MARKDOWN_WRAP_WIDTH) {
            lines.push(format!("  {line}"));
        }
        lines.push(String::new());
    }
    lines.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample(published: bool, source: &str, summary: &str) -> Article {
        Article {
            title: "Robots learn to read".to_string(),
            link: "https://example.com/robots".to_string(),
            published_at: published.then(|| Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap()),
            source: source.to_string(),
            tags: vec!["ai".to_string(), "robotics".to_string()],
            summary: summary.to_string(),
            full_text: "Полный текст статьи. Full body here.".to_string(),
            raw: serde_json::json!({"id": "urn:1"}),
        }
    }

    #[test]
    fn test_json_field_order_and_null_timestamp() {
        let json = to_json(&[sample(false, "Wire", "Short summary.")]).unwrap();
        let title = json.find("\"title\"").unwrap();
        let link = json.find("\"link\"").unwrap();
        let published = json.find("\"published_at\": null").unwrap();
        let source = json.find("\"source\"").unwrap();
        let tags = json.find("\"tags\"").unwrap();
        let summary = json.find("\"summary\"").unwrap();
        let full_text = json.find("\"full_text\"").unwrap();
        assert!(title < link && link < published && published < source);
        assert!(source < tags && tags < summary && summary < full_text);
        assert!(!json.contains("raw"));
        assert!(json.contains("Полный текст"));
    }

    #[test]
    fn test_json_round_trip_excluding_raw() {
        let articles = vec![sample(true, "Wire", "One. Two."), sample(false, "", "Three.")];
        let json = to_json(&articles).unwrap();
        let decoded: Vec<Article> = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded.len(), articles.len());
        for (decoded, original) in decoded.iter().zip(&articles) {
            let expected = Article {
                raw: serde_json::Value::Null,
                ..original.clone()
            };
            assert_eq!(decoded, &expected);
        }
    }

    #[test]
    fn test_markdown_with_timestamp_and_source() {
        let md = to_markdown(&[sample(true, "Wire", "A short summary.")]);
        assert_eq!(
            md,
            "- [Robots learn to read](https://example.com/robots) — 2024-05-17 09:30 (Wire)\n  A short summary."
        );
    }

    #[test]
    fn test_markdown_omits_missing_timestamp_and_source() {
        let md = to_markdown(&[sample(false, "", "A short summary.")]);
        assert_eq!(
            md,
            "- [Robots learn to read](https://example.com/robots)\n  A short summary."
        );
    }

    #[test]
    fn test_markdown_wraps_and_separates_entries() {
        let long = "word ".repeat(60);
        let md = to_markdown(&[sample(false, "", &long), sample(false, "", "Second.")]);
        let lines: Vec<&str> = md.lines().collect();

        assert!(lines.iter().all(|l| l.chars().count() <= MARKDOWN_WRAP_WIDTH + 2));
        let blank = lines.iter().position(|l| l.is_empty()).unwrap();
        assert!(lines[blank + 1].starts_with("- [Robots learn to read]"));
        assert_eq!(lines.last(), Some(&"  Second."));
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("markdown".parse::<OutputFormat>(), Ok(OutputFormat::Markdown));
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
