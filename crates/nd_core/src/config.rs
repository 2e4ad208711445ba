//! Run configuration for a digest collection.
//!
//! Values are resolved from, in increasing precedence: built-in defaults, an
//! optional YAML/TOML/JSON file, `NEWSDIGEST_`-prefixed environment variables
//! and finally command-line flags (applied by the binary on top of
//! [`DigestConfigLoader::load`]).
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

use crate::report::OutputFormat;
use crate::{Error, Result};

pub const ENV_PREFIX: &str = "NEWSDIGEST";

pub const DEFAULT_SOURCES: &[&str] = &[
    "https://rss.app/feeds/AFa0yOqD5b79v8sP.xml",
    "https://feeds.feedburner.com/VenturebeatAI",
    "https://www.technologyreview.com/feed/",
    "https://www.theverge.com/artificial-intelligence/rss/index.xml",
    "https://www.analyticsvidhya.com/blog/category/artificial-intelligence/feed/",
    "https://www.reuters.com/world/technology/rss",
];

pub const DEFAULT_KEYWORDS: &[&str] = &[
    "artificial intelligence",
    "ai",
    "machine learning",
    "deep learning",
    "neural network",
    "large language model",
    "llm",
];

/// Diagnostic verbosity; accepts the WARNING/CRITICAL spellings as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
    Off,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warning),
            "ERROR" | "CRITICAL" | "FATAL" => Ok(LogLevel::Error),
            "OFF" | "NONE" => Ok(LogLevel::Off),
            other => Err(format!("unknown log level: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    pub sources: Vec<String>,
    pub keywords: Vec<String>,
    pub limit: usize,
    pub min_length: usize,
    pub summary_sentences: usize,
    pub max_workers: usize,
    /// Per-fetch timeout in seconds.
    pub timeout: f64,
    /// Optional run-wide deadline in seconds.
    pub deadline: Option<f64>,
    pub output: OutputFormat,
    pub summarizer: String,
    pub log_level: String,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            sources: DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
            keywords: DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            limit: 10,
            min_length: 600,
            summary_sentences: 3,
            max_workers: 6,
            timeout: 10.0,
            deadline: None,
            output: OutputFormat::Markdown,
            summarizer: "frequency".to_string(),
            log_level: "WARNING".to_string(),
        }
    }
}

impl DigestConfig {
    /// Reject invalid values before any network activity happens.
    pub fn validate(&self) -> Result<()> {
        if self.summary_sentences < 1 {
            return Err(Error::Config("summary-sentences must be at least 1".into()));
        }
        if self.max_workers < 1 {
            return Err(Error::Config("max-workers must be at least 1".into()));
        }
        if !(self.timeout.is_finite() && self.timeout > 0.0) {
            return Err(Error::Config(format!(
                "timeout must be a positive number of seconds, got {}",
                self.timeout
            )));
        }
        if let Some(deadline) = self.deadline {
            if !(deadline.is_finite() && deadline > 0.0) {
                return Err(Error::Config(format!(
                    "deadline must be a positive number of seconds, got {deadline}"
                )));
            }
        }
        self.log_level().map_err(Error::Config)?;
        for source in &self.sources {
            validate_source(source)?;
        }
        Ok(())
    }

    pub fn log_level(&self) -> std::result::Result<LogLevel, String> {
        self.log_level.parse()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout)
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline.map(Duration::from_secs_f64)
    }

    /// Empty lists fall back to the built-in defaults.
    pub fn with_defaults_for_empty_lists(mut self) -> Self {
        if self.sources.is_empty() {
            self.sources = DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect();
        }
        if self.keywords.iter().all(|k| k.trim().is_empty()) {
            self.keywords = DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect();
        }
        self
    }
}

fn validate_source(source: &str) -> Result<()> {
    if source.trim().is_empty() {
        return Err(Error::Config("empty feed source".into()));
    }
    match Url::parse(source) {
        Ok(url) => match url.scheme() {
            "http" | "https" | "file" => Ok(()),
            // Windows drive letters parse as a one-letter scheme.
            scheme if scheme.len() == 1 => Ok(()),
            scheme => Err(Error::InvalidUrl(format!(
                "unsupported scheme {scheme:?} in feed source {source}"
            ))),
        },
        // Anything that is not a URL is treated as a local path.
        Err(_) => Ok(()),
    }
}

/// Builder hiding the `config` crate wiring (file + env overrides).
pub struct DigestConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for DigestConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DigestConfigLoader {
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a file; the format is inferred from the extension.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Merge an inline YAML snippet.
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder, overlaying `NEWSDIGEST_*` environment variables last.
    pub fn load(self) -> Result<DigestConfig> {
        let env = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("sources")
            .with_list_parse_key("keywords");
        let cfg = self.builder.add_source(env).build()?;
        let typed: DigestConfig = cfg.try_deserialize()?;
        Ok(typed.with_defaults_for_empty_lists())
    }
}
