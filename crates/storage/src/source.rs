use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced while fetching raw question data.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("question source {location} is unreachable: {reason}")]
    Unreachable { location: String, reason: String },

    #[error("question source {location} returned status {status}")]
    Status { location: String, status: u16 },
}

/// Where raw tabular question text comes from.
///
/// One fetch is a single request/response; there is no retry.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Human-readable location used in logs and errors.
    fn location(&self) -> String;

    /// Fetch the full text of the source.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the source cannot be read.
    async fn fetch(&self) -> Result<String, SourceError>;
}

/// Reads questions from a local file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl QuestionSource for FileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<String, SourceError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SourceError::Unreachable {
                location: self.location(),
                reason: e.to_string(),
            })
    }
}

/// Fetches questions over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl QuestionSource for HttpSource {
    fn location(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<String, SourceError> {
        let unreachable = |e: reqwest::Error| SourceError::Unreachable {
            location: self.url.clone(),
            reason: e.to_string(),
        };

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(unreachable)?;

        if !response.status().is_success() {
            return Err(SourceError::Status {
                location: self.url.clone(),
                status: response.status().as_u16(),
            });
        }

        response.text().await.map_err(unreachable)
    }
}

/// In-memory source for tests and prototyping.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    text: String,
}

impl StaticSource {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl QuestionSource for StaticSource {
    fn location(&self) -> String {
        "<memory>".to_string()
    }

    async fn fetch(&self) -> Result<String, SourceError> {
        Ok(self.text.clone())
    }
}
