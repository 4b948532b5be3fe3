//! Snapshot sources
//!
//! A snapshot is a JSON array of [`SymbolRecord`] stored as
//! `processed_data_<date>.json`, either on disk or behind an HTTP base URL.

use crate::error::LoadError;
use crate::types::SymbolRecord;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

/// Source of per-date symbol snapshots
#[async_trait]
pub trait DayLoader: Send + Sync {
    /// Load every record for one date identifier
    async fn load(&self, date: &str) -> Result<Vec<SymbolRecord>, LoadError>;
}

/// File name of the snapshot for a date
#[must_use]
pub fn data_file_name(date: &str) -> String {
    format!("processed_data_{date}.json")
}

fn parse_snapshot(date: &str, body: &[u8]) -> Result<Vec<SymbolRecord>, LoadError> {
    serde_json::from_slice(body).map_err(|source| LoadError::Parse {
        date: date.to_string(),
        source,
    })
}

/// Reads snapshots from a local directory
#[derive(Debug, Clone)]
pub struct FileDayLoader {
    root: PathBuf,
}

impl FileDayLoader {
    /// Create loader rooted at a directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Full path of the snapshot for a date
    #[must_use]
    pub fn path_for(&self, date: &str) -> PathBuf {
        self.root.join(data_file_name(date))
    }
}

#[async_trait]
impl DayLoader for FileDayLoader {
    async fn load(&self, date: &str) -> Result<Vec<SymbolRecord>, LoadError> {
        let path = self.path_for(date);
        debug!("Reading snapshot {}", path.display());

        let body = tokio::fs::read(&path).await.map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;

        parse_snapshot(date, &body)
    }
}

/// Fetches snapshots from a static HTTP host
#[derive(Debug, Clone)]
pub struct HttpDayLoader {
    base_url: String,
    client: reqwest::Client,
}

impl HttpDayLoader {
    /// Create loader for a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create loader sharing an existing client
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    /// Full URL of the snapshot for a date
    #[must_use]
    pub fn url_for(&self, date: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), data_file_name(date))
    }
}

#[async_trait]
impl DayLoader for HttpDayLoader {
    async fn load(&self, date: &str) -> Result<Vec<SymbolRecord>, LoadError> {
        let url = self.url_for(date);
        debug!("Fetching snapshot {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        parse_snapshot(date, &body)
    }
}
