use async_trait::async_trait;
use std::time::Duration;
use crate::Result;

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch a document body, making exactly one attempt bounded by `timeout`.
    async fn fetch(&self, location: &str, timeout: Duration) -> Result<String>;
}

pub trait Summarizer: Send + Sync {
    fn name(&self) -> &str;

    /// Return at most `max_sentences` sentences of `text`, in document order.
    fn summarize(&self, text: &str, max_sentences: usize) -> String;
}
