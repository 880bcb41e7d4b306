//! Show descriptor loaders.
//!
//! Both sources read the whole document in one go and hand it to
//! [`ShowDescriptor::from_json`], so validation is identical whichever
//! transport delivered the bytes.

use seatmap_core::environment::{ShowFuture, ShowSource};
use seatmap_core::error::LoadError;
use seatmap_core::types::ShowDescriptor;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Where to read the show descriptor from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowLocation {
    /// An `http://` or `https://` URL
    Url(String),
    /// A path on the local filesystem
    File(PathBuf),
}

impl ShowLocation {
    /// Classify a configured location string
    #[must_use]
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for ShowLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Build the source matching `location`
#[must_use]
pub fn source_for(location: &ShowLocation) -> Arc<dyn ShowSource> {
    match location {
        ShowLocation::Url(url) => Arc::new(HttpShowSource::new(url.clone())),
        ShowLocation::File(path) => Arc::new(FileShowSource::new(path.clone())),
    }
}

/// Reads the descriptor with a single HTTP GET
#[derive(Debug, Clone)]
pub struct HttpShowSource {
    client: reqwest::Client,
    url: String,
}

impl HttpShowSource {
    /// Source for `url` with a default client
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    /// Source for `url` sharing an existing client
    #[must_use]
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    async fn fetch(&self) -> Result<ShowDescriptor, LoadError> {
        tracing::info!(url = %self.url, "Fetching show descriptor");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LoadError::Unreachable {
                location: self.url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::HttpStatus {
                location: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| LoadError::Io {
            location: self.url.clone(),
            reason: e.to_string(),
        })?;

        ShowDescriptor::from_json(&body)
    }
}

impl ShowSource for HttpShowSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch_show(&self) -> ShowFuture<'_> {
        Box::pin(async move {
            let result = self.fetch().await;
            log_outcome(&self.url, &result);
            result
        })
    }
}

/// Reads the descriptor from a JSON file
#[derive(Debug, Clone)]
pub struct FileShowSource {
    path: PathBuf,
}

impl FileShowSource {
    /// Source for the file at `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn fetch(&self) -> Result<ShowDescriptor, LoadError> {
        tracing::info!(path = %self.path.display(), "Reading show descriptor");

        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| LoadError::Io {
                location: self.path.display().to_string(),
                reason: e.to_string(),
            })?;

        ShowDescriptor::from_json(&body)
    }
}

impl ShowSource for FileShowSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch_show(&self) -> ShowFuture<'_> {
        Box::pin(async move {
            let result = self.fetch().await;
            log_outcome(&self.describe(), &result);
            result
        })
    }
}

fn log_outcome(location: &str, result: &Result<ShowDescriptor, LoadError>) {
    match result {
        Ok(show) => {
            metrics::counter!("loader.fetches", "outcome" => "ok").increment(1);
            tracing::info!(
                location,
                title = %show.movie.title,
                seats = show.seat_layout.seat_count(),
                "Show descriptor loaded"
            );
        },
        Err(error) => {
            metrics::counter!("loader.fetches", "outcome" => "error").increment(1);
            tracing::error!(location, error = %error, "Failed to load show descriptor");
        },
    }
}
