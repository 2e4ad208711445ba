use nd_core::{sort_by_recency, Article, DigestConfig, Error, FeedEntry, Fetcher, Result, Summarizer};
use nd_inference::text::shorten;
use futures::StreamExt;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::{sleep_until, timeout_at, Instant};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::extract::{extract_text, fragment_text};
use crate::feeds::FeedReader;
use crate::filter::KeywordFilter;

pub const SUMMARY_FALLBACK_WIDTH: usize = 280;
pub const SUMMARY_PLACEHOLDER: &str = "…";

#[derive(Debug, Clone, PartialEq)]
pub struct CollectorConfig {
    pub sources: Vec<String>,
    pub keywords: Vec<String>,
    pub limit: usize,
    pub min_length: usize,
    pub summary_sentences: usize,
    pub max_workers: usize,
    pub timeout: Duration,
    pub deadline: Option<Duration>,
}

impl From<&DigestConfig> for CollectorConfig {
    fn from(config: &DigestConfig) -> Self {
        Self {
            sources: config.sources.clone(),
            keywords: config.keywords.clone(),
            limit: config.limit,
            min_length: config.min_length,
            summary_sentences: config.summary_sentences,
            max_workers: config.max_workers,
            timeout: config.timeout(),
            deadline: config.deadline(),
        }
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self::from(&DigestConfig::default())
    }
}

/// Why a candidate entry did not become an article.
#[derive(Debug)]
pub enum DropReason {
    MissingLink,
    UnsupportedLink,
    Fetch(Error),
    EmptyBody,
    Shutdown,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::MissingLink => write!(f, "entry has no link"),
            DropReason::UnsupportedLink => write!(f, "link is not an http(s) URL"),
            DropReason::Fetch(e) => write!(f, "fetch failed: {e}"),
            DropReason::EmptyBody => write!(f, "no body text"),
            DropReason::Shutdown => write!(f, "worker pool shut down"),
        }
    }
}

/// Result of one worker.
#[derive(Debug)]
pub enum Outcome {
    Accepted(Article),
    Dropped { link: String, reason: DropReason },
}

/// Article links are only ever fetched over the network; local paths and
/// `file://` URIs are reserved for feed sources.
fn is_remote_link(link: &str) -> bool {
    Url::parse(link)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Fetch, extract and summarize one entry.
pub async fn build_article(
    entry: FeedEntry,
    fetcher: &dyn Fetcher,
    summarizer: &dyn Summarizer,
    timeout: Duration,
    summary_sentences: usize,
) -> Outcome {
    if entry.link.trim().is_empty() {
        return Outcome::Dropped {
            link: entry.link,
            reason: DropReason::MissingLink,
        };
    }
    if !is_remote_link(&entry.link) {
        return Outcome::Dropped {
            link: entry.link,
            reason: DropReason::UnsupportedLink,
        };
    }
    let html = match fetcher.fetch(&entry.link, timeout).await {
        Ok(html) => html,
        Err(e) => {
            return Outcome::Dropped {
                link: entry.link,
                reason: DropReason::Fetch(e),
            }
        }
    };

    let mut body = extract_text(&html).trim().to_string();
    if body.is_empty() {
        debug!(link = %entry.link, "no extractable text, using feed snippet");
        body = fragment_text(&entry.snippet).trim().to_string();
    }
    if body.is_empty() {
        return Outcome::Dropped {
            link: entry.link,
            reason: DropReason::EmptyBody,
        };
    }

    let mut summary = summarizer.summarize(&body, summary_sentences);
    if summary.trim().is_empty() {
        summary = shorten(&body, SUMMARY_FALLBACK_WIDTH, SUMMARY_PLACEHOLDER);
    }
    Outcome::Accepted(Article::from_entry(entry, summary, body))
}

/// Runs one collection: read feeds, filter, fetch in parallel, rank.
pub struct Collector {
    config: CollectorConfig,
    fetcher: Arc<dyn Fetcher>,
    summarizer: Arc<dyn Summarizer>,
    filter: KeywordFilter,
    semaphore: Arc<Semaphore>,
}

impl Collector {
    pub fn new(
        config: CollectorConfig,
        fetcher: Arc<dyn Fetcher>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        let filter = KeywordFilter::new(&config.keywords);
        let semaphore = Arc::new(Semaphore::new(config.max_workers.max(1)));
        Self {
            config,
            fetcher,
            summarizer,
            filter,
            semaphore,
        }
    }

    pub async fn collect(&self) -> Result<Vec<Article>> {
        if self.config.limit == 0 {
            info!("limit is zero, nothing to collect");
            return Ok(Vec::new());
        }
        let deadline = self.config.deadline.map(|d| Instant::now() + d);

        let reader = FeedReader::new(Arc::clone(&self.fetcher), self.config.timeout);
        let stream = reader.entries(&self.config.sources);
        let entries: Vec<FeedEntry> = match deadline {
            Some(at) => stream.take_until(sleep_until(at)).collect().await,
            None => stream.collect().await,
        };
        info!(
            sources = self.config.sources.len(),
            entries = entries.len(),
            "feeds read"
        );

        let candidates = self.select(entries);
        info!(candidates = candidates.len(), "entries matched keywords");

        let mut tasks = JoinSet::new();
        for entry in candidates {
            let fetcher = Arc::clone(&self.fetcher);
            let summarizer = Arc::clone(&self.summarizer);
            let semaphore = Arc::clone(&self.semaphore);
            let timeout = self.config.timeout;
            let sentences = self.config.summary_sentences;
            tasks.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        return Outcome::Dropped {
                            link: entry.link,
                            reason: DropReason::Shutdown,
                        }
                    }
                };
                build_article(entry, fetcher.as_ref(), summarizer.as_ref(), timeout, sentences)
                    .await
            });
        }

        let mut articles = self.gather(tasks, deadline).await;
        sort_by_recency(&mut articles);
        articles.truncate(self.config.limit);
        info!(accepted = articles.len(), "collection finished");
        Ok(articles)
    }

    /// Keyword gate plus per-run link de-duplication.
    fn select(&self, entries: Vec<FeedEntry>) -> Vec<FeedEntry> {
        let mut seen = HashSet::new();
        entries
            .into_iter()
            .filter(|e| self.filter.matches(&e.title, &e.snippet))
            .filter(|e| {
                let fresh = seen.insert(e.link.clone());
                if !fresh {
                    debug!(link = %e.link, "duplicate link skipped");
                }
                fresh
            })
            .collect()
    }

    /// Drain workers in completion order until the limit, the deadline or the
    /// end of work; whatever is still running is aborted.
    async fn gather(&self, mut tasks: JoinSet<Outcome>, deadline: Option<Instant>) -> Vec<Article> {
        let mut accepted = Vec::new();
        loop {
            let joined = match deadline {
                Some(at) => {
                    let next = timeout_at(at, tasks.join_next()).await;
                    match next {
                        Ok(joined) => joined,
                        Err(_) => {
                            warn!(outstanding = tasks.len(), "deadline elapsed, abandoning remaining fetches");
                            break;
                        }
                    }
                }
                None => tasks.join_next().await,
            };
            let Some(joined) = joined else { break };

            match joined {
                Ok(Outcome::Accepted(article)) => {
                    let len = article.body_len();
                    if len < self.config.min_length {
                        debug!(link = %article.link, len, min = self.config.min_length, "body too short");
                        continue;
                    }
                    debug!(link = %article.link, len, "article accepted");
                    accepted.push(article);
                    if accepted.len() >= self.config.limit {
                        debug!(outstanding = tasks.len(), "limit reached");
                        break;
                    }
                }
                Ok(Outcome::Dropped { link, reason }) => match reason {
                    DropReason::Fetch(e) => warn!(link = %link, error = %e, "failed to download article"),
                    reason => debug!(link = %link, reason = %reason, "entry dropped"),
                },
                Err(e) if e.is_cancelled() => {}
                Err(e) => error!(error = %e, "worker panicked"),
            }
        }
        tasks.abort_all();
        accepted
    }
}
