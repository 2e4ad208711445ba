pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod types;

pub use config::{DigestConfig, DigestConfigLoader, LogLevel};
pub use error::{Error, Result};
pub use models::{Fetcher, Summarizer};
pub use report::OutputFormat;
pub use types::{sort_by_recency, Article, FeedEntry};
