//! Data sources
//!
//! The data file is either a local path or an `http(s)://` URL. Each source
//! performs a single fetch attempt; there are no retries.

use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

use super::error::{LoadError, LoadResult};

/// Common trait for all data file locations
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Human-readable location for logs and messages
    fn describe(&self) -> String;

    /// Fetch the raw JSON payload
    async fn fetch(&self) -> LoadResult<Vec<u8>>;
}

/// Data file on the local filesystem
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DataSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> LoadResult<Vec<u8>> {
        let bytes = tokio::fs::read(&self.path).await?;
        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "Read data file");
        Ok(bytes)
    }
}

/// Data file served over HTTP
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    /// Create a source with a request timeout
    pub fn new(url: impl Into<String>, timeout: Duration) -> LoadResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl DataSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> LoadResult<Vec<u8>> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        tracing::debug!(url = %self.url, bytes = bytes.len(), "Downloaded data file");
        Ok(bytes.to_vec())
    }
}

/// Whether a location string names an HTTP(S) resource
pub fn is_remote(location: &str) -> bool {
    let lower = location.trim().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Pick the source type for a location string
pub fn source_for(location: &str, timeout: Duration) -> LoadResult<Box<dyn DataSource>> {
    if is_remote(location) {
        Ok(Box::new(HttpSource::new(location.trim(), timeout)?))
    } else {
        Ok(Box::new(FileSource::new(location)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://example.org/assets/2021rv.json"));
        assert!(is_remote("HTTP://localhost:4200/assets/2021rv.json"));
        assert!(!is_remote("./assets/2021rv.json"));
        assert!(!is_remote("/data/2021rv.json"));
    }

    #[test]
    fn test_source_for() {
        let timeout = Duration::from_secs(5);

        let remote = source_for("https://example.org/2021rv.json", timeout).unwrap();
        assert_eq!(remote.describe(), "https://example.org/2021rv.json");

        let local = source_for("/data/2021rv.json", timeout).unwrap();
        assert_eq!(local.describe(), "/data/2021rv.json");
    }

    #[tokio::test]
    async fn test_file_source_fetch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("2021rv.json");
        std::fs::write(&path, b"[]").unwrap();

        let bytes = FileSource::new(&path).fetch().await.unwrap();
        assert_eq!(bytes, b"[]");
    }

    #[tokio::test]
    async fn test_file_source_missing() {
        let dir = tempdir().unwrap();
        let result = FileSource::new(dir.path().join("missing.json")).fetch().await;

        assert!(matches!(result, Err(LoadError::Io(_))));
    }
}
