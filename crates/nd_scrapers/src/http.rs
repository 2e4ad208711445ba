use async_trait::async_trait;
use nd_core::{Error, Fetcher, Result};
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const USER_AGENT: &str = concat!("newsdigest/", env!("CARGO_PKG_VERSION"));
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Where a source or article lives.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    Remote(Url),
    Local(PathBuf),
}

impl Location {
    pub fn parse(location: &str) -> Result<Self> {
        match Url::parse(location) {
            Ok(url) => match url.scheme() {
                "http" | "https" => Ok(Location::Remote(url)),
                "file" => url
                    .to_file_path()
                    .map(Location::Local)
                    .map_err(|_| Error::InvalidUrl(location.to_string())),
                scheme if scheme.len() == 1 => Ok(Location::Local(PathBuf::from(location))),
                scheme => Err(Error::InvalidUrl(format!(
                    "unsupported scheme {scheme:?} in {location}"
                ))),
            },
            Err(_) => Ok(Location::Local(PathBuf::from(location))),
        }
    }
}

/// Fetcher backed by one shared `reqwest` client, with local file support.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;
        Ok(Self { client })
    }

    async fn fetch_remote(&self, url: Url, timeout: Duration) -> Result<String> {
        let label = url.to_string();
        debug!(url = %label, ?timeout, "GET");
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| map_reqwest_error(&label, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                url: label,
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| map_reqwest_error(&label, e))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, location: &str, timeout: Duration) -> Result<String> {
        match Location::parse(location)? {
            Location::Remote(url) => self.fetch_remote(url, timeout).await,
            Location::Local(path) => {
                debug!(path = %path.display(), "reading local file");
                match tokio::time::timeout(timeout, tokio::fs::read(&path)).await {
                    Ok(bytes) => Ok(String::from_utf8_lossy(&bytes?).into_owned()),
                    Err(_) => Err(Error::Timeout(location.to_string())),
                }
            }
        }
    }
}

fn map_reqwest_error(url: &str, err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout(url.to_string())
    } else if let Some(status) = err.status() {
        Error::Http {
            url: url.to_string(),
            status: status.as_u16(),
        }
    } else {
        Error::Network(format!("{url}: {err}"))
    }
}
