//! Feed ingestion, article extraction and the collection pipeline.
pub mod cli;
pub mod extract;
pub mod feeds;
pub mod filter;
pub mod http;
pub mod logging;
pub mod manager;

#[cfg(test)]
pub(crate) mod testing;

pub use cli::{handle_command, run, DigestArgs};
pub use feeds::FeedReader;
pub use filter::KeywordFilter;
pub use http::HttpFetcher;
pub use manager::{Collector, CollectorConfig, DropReason, Outcome};
