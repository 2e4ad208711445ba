//! Test doubles shared by the unit tests of this crate.
use async_trait::async_trait;
use nd_core::{Error, Fetcher, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

enum MockResponse {
    Body(String),
    Delayed(Duration, String),
    Status(u16),
}

/// In-memory [`Fetcher`] keyed by location; unknown locations answer 404.
/// Records every call and the highest number of calls in flight at once.
pub struct MockFetcher {
    responses: HashMap<String, MockResponse>,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

/// Decrements the in-flight counter even when the calling task is aborted.
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    pub fn with_body(mut self, location: &str, body: impl Into<String>) -> Self {
        self.responses
            .insert(location.to_string(), MockResponse::Body(body.into()));
        self
    }

    /// Answer after `delay`, or time out if the caller's timeout is shorter.
    pub fn with_delay(mut self, location: &str, delay: Duration, body: impl Into<String>) -> Self {
        self.responses
            .insert(location.to_string(), MockResponse::Delayed(delay, body.into()));
        self
    }

    pub fn with_status(mut self, location: &str, status: u16) -> Self {
        self.responses
            .insert(location.to_string(), MockResponse::Status(status));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn call_count(&self, location: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == location)
            .count()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, location: &str, timeout: Duration) -> Result<String> {
        self.calls.lock().unwrap().push(location.to_string());
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(current, Ordering::SeqCst);
        let _guard = InFlight(&self.in_flight);

        match self.responses.get(location) {
            Some(MockResponse::Body(body)) => Ok(body.clone()),
            Some(MockResponse::Delayed(delay, body)) => {
                tokio::time::timeout(timeout, tokio::time::sleep(*delay))
                    .await
                    .map_err(|_| Error::Timeout(location.to_string()))?;
                Ok(body.clone())
            }
            Some(MockResponse::Status(status)) => Err(Error::Http {
                url: location.to_string(),
                status: *status,
            }),
            None => Err(Error::Http {
                url: location.to_string(),
                status: 404,
            }),
        }
    }
}

pub fn rss_item(title: &str, link: &str, description: &str, pub_date: Option<&str>) -> String {
    let mut item = format!("<item><title>{title}</title>");
    if !link.is_empty() {
        item.push_str(&format!("<link>{link}</link>"));
    }
    if !description.is_empty() {
        item.push_str(&format!("<description><![CDATA[{description}]]></description>"));
    }
    if let Some(date) = pub_date {
        item.push_str(&format!("<pubDate>{date}</pubDate>"));
    }
    item.push_str("</item>");
    item
}

pub fn rss(title: &str, items: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>{title}</title><link>https://feeds.test/</link><description>test feed</description>{}</channel></rss>"#,
        items.concat()
    )
}

/// A page whose extracted body is exactly `paragraph`.
pub fn article_page(paragraph: &str) -> String {
    format!(
        "<html><head><title>t</title><script>var x = 1;</script></head>\
         <body><nav><p>Home About Contact Careers Press</p></nav>\
         <article><p>{paragraph}</p></article></body></html>"
    )
}
