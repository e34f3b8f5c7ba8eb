//! Where the canonical list comes from

use crate::domain::violations::{BurnerError, BurnerResult};
use async_trait::async_trait;
use reqwest::Client;
use std::fs;
use std::time::Duration;

/// Fetches the raw text of a domain list
#[async_trait]
pub trait ListSource: Send + Sync {
    async fn fetch(&self, location: &str) -> BurnerResult<String>;
}

/// Single HTTP GET, no retries
pub struct HttpListSource {
    client: Client,
}

impl HttpListSource {
    pub fn new(timeout: Duration) -> BurnerResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BurnerError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ListSource for HttpListSource {
    async fn fetch(&self, location: &str) -> BurnerResult<String> {
        tracing::debug!("Fetching list from {}", location);

        let response = self
            .client
            .get(location)
            .send()
            .await
            .map_err(|e| BurnerError::fetch(location, e.to_string()))?;

        tracing::debug!("List response status: {}", response.status());

        let bytes = response
            .error_for_status()
            .map_err(|e| BurnerError::fetch(location, e.to_string()))?
            .bytes()
            .await
            .map_err(|e| BurnerError::fetch(location, e.to_string()))?;

        String::from_utf8(bytes.to_vec())
            .map_err(|e| BurnerError::fetch(location, format!("Body is not UTF-8: {e}")))
    }
}

/// Reads the list from a local file
#[derive(Debug, Default)]
pub struct FileListSource;

#[async_trait]
impl ListSource for FileListSource {
    async fn fetch(&self, location: &str) -> BurnerResult<String> {
        fs::read_to_string(location).map_err(|e| BurnerError::fetch(location, e.to_string()))
    }
}

/// Dispatches `http://` and `https://` locations to HTTP, anything else to the file system
pub struct AutoListSource {
    http: HttpListSource,
    file: FileListSource,
}

impl AutoListSource {
    pub fn new(timeout: Duration) -> BurnerResult<Self> {
        Ok(Self {
            http: HttpListSource::new(timeout)?,
            file: FileListSource,
        })
    }
}

/// Whether a list location must be fetched over HTTP
pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

#[async_trait]
impl ListSource for AutoListSource {
    async fn fetch(&self, location: &str) -> BurnerResult<String> {
        if is_remote(location) {
            self.http.fetch(location).await
        } else {
            self.file.fetch(location).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_http_fetch_returns_body() {
        let server = MockServer::start_async().await;
        let list_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/emails.txt");
                then.status(200).body("mailinator.com\n0-00.usa.cc\n");
            })
            .await;

        let source = HttpListSource::new(Duration::from_secs(5)).unwrap();
        let body = source.fetch(&server.url("/emails.txt")).await.unwrap();

        list_mock.assert_async().await;
        assert_eq!(body, "mailinator.com\n0-00.usa.cc\n");
    }

    #[tokio::test]
    async fn test_http_error_status_is_fetch_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/emails.txt");
                then.status(404);
            })
            .await;

        let source = HttpListSource::new(Duration::from_secs(5)).unwrap();
        let err = source.fetch(&server.url("/emails.txt")).await.unwrap_err();
        assert!(matches!(err, BurnerError::Fetch { .. }));
    }

    #[tokio::test]
    async fn test_file_source() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("emails.txt");
        fs::write(&path, "a.com\n").unwrap();

        let source = FileListSource;
        let body = source.fetch(&path.to_string_lossy()).await.unwrap();
        assert_eq!(body, "a.com\n");

        let missing = temp_dir.path().join("missing.txt");
        assert!(source.fetch(&missing.to_string_lossy()).await.is_err());
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://raw.githubusercontent.com/x/emails.txt"));
        assert!(is_remote("http://localhost:8080/emails.txt"));
        assert!(!is_remote("emails.txt"));
        assert!(!is_remote("/srv/lists/emails.txt"));
    }
}
