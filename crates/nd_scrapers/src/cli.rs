use clap::Args;
use nd_core::report::render;
use nd_core::{DigestConfig, DigestConfigLoader, OutputFormat, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::http::HttpFetcher;
use crate::logging::init_logging;
use crate::manager::{Collector, CollectorConfig};

/// Command-line overrides. Unset flags fall through to `NEWSDIGEST_*`
/// environment variables, the config file, then built-in defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct DigestArgs {
    /// Maximum number of articles to return
    #[arg(long)]
    pub limit: Option<usize>,

    /// Minimum article body length in characters
    #[arg(long)]
    pub min_length: Option<usize>,

    /// Sentences per summary
    #[arg(long)]
    pub summary_sentences: Option<usize>,

    /// Report format (json or markdown)
    #[arg(long)]
    pub output: Option<OutputFormat>,

    /// Feed URLs or local feed files
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    pub sources: Option<Vec<String>>,

    /// Keyword phrases an entry must mention
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    pub keywords: Option<Vec<String>>,

    /// Concurrent article downloads
    #[arg(long)]
    pub max_workers: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<f64>,

    /// Give up on outstanding downloads after this many seconds
    #[arg(long)]
    pub deadline: Option<f64>,

    /// Summarizer model (frequency or lead)
    #[arg(long)]
    pub summarizer: Option<String>,

    /// Log level (DEBUG, INFO, WARNING, ERROR, CRITICAL)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Configuration file (YAML, TOML or JSON)
    #[arg(long, env = "NEWSDIGEST_CONFIG")]
    pub config: Option<PathBuf>,
}

impl DigestArgs {
    /// Overlay the flags that were given on top of `config`.
    pub fn apply(self, mut config: DigestConfig) -> DigestConfig {
        if let Some(limit) = self.limit {
            config.limit = limit;
        }
        if let Some(min_length) = self.min_length {
            config.min_length = min_length;
        }
        if let Some(sentences) = self.summary_sentences {
            config.summary_sentences = sentences;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(sources) = self.sources {
            config.sources = sources;
        }
        if let Some(keywords) = self.keywords {
            config.keywords = keywords;
        }
        if let Some(workers) = self.max_workers {
            config.max_workers = workers;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if self.deadline.is_some() {
            config.deadline = self.deadline;
        }
        if let Some(summarizer) = self.summarizer {
            config.summarizer = summarizer;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        config.with_defaults_for_empty_lists()
    }

    /// Load file and environment layers, apply flags and validate.
    pub fn resolve(&self) -> Result<DigestConfig> {
        let mut loader = DigestConfigLoader::new();
        if let Some(path) = &self.config {
            loader = loader.with_file(path);
        }
        let config = self.clone().apply(loader.load()?);
        config.validate()?;
        nd_inference::create_model(Some(config.summarizer.as_str()))?;
        Ok(config)
    }
}

/// Collect and render one digest for an already validated configuration.
pub async fn run(config: &DigestConfig) -> Result<String> {
    let summarizer = nd_inference::create_model(Some(config.summarizer.as_str()))?;
    let fetcher = Arc::new(HttpFetcher::new()?);
    let collector = Collector::new(CollectorConfig::from(config), fetcher, summarizer);

    let articles = collector.collect().await?;
    info!(count = articles.len(), format = %config.output, "rendering report");
    render(config.output, &articles)
}

pub async fn handle_command(args: DigestArgs) -> Result<String> {
    let config = args.resolve()?;
    init_logging(config.log_level().map_err(nd_core::Error::Config)?);
    run(&config).await
}
