//! Definition source client

use std::fmt;
use std::future::Future;

/// Dictionary page base URL, word appended as a path segment
const DICTIONARY_URL: &str = "https://www.vocabulary.com/dictionary";

/// Identifying request header sent with every fetch
const USER_AGENT: &str = concat!("lookup/", env!("CARGO_PKG_VERSION"));

/// Outcome of a definition fetch
#[derive(Debug)]
pub enum FetchOutcome {
    /// The source returned a definition page
    Found(String),

    /// The source has no entry for the word
    Miss,
}

/// Transport-level fetch failure
#[derive(Debug)]
pub enum TransportError {
    /// Network or protocol error
    Http(reqwest::Error),

    /// Unexpected response status
    Status(reqwest::StatusCode),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Http(e) => write!(f, "HTTP error: {}", e),
            TransportError::Status(code) => write!(f, "Unexpected status: {}", code),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Http(err)
    }
}

/// Source of raw definition markup
///
/// One outbound call per invocation, no retries. A well-formed "not found"
/// response is a [`FetchOutcome::Miss`], not an error.
pub trait DefinitionSource {
    /// Fetch the raw definition page for a trimmed, non-empty word
    fn fetch(
        &self,
        word: &str,
    ) -> impl Future<Output = Result<FetchOutcome, TransportError>> + Send;
}

/// HTTP client for the vocabulary.com dictionary pages
pub struct VocabularyClient {
    http: reqwest::Client,
}

impl VocabularyClient {
    /// Create a client with the transport's default timeouts
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl Default for VocabularyClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DefinitionSource for VocabularyClient {
    async fn fetch(&self, word: &str) -> Result<FetchOutcome, TransportError> {
        let url = format!("{}/{}", DICTIONARY_URL, word);

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(FetchOutcome::Miss);
        }
        if !status.is_success() {
            return Err(TransportError::Status(status));
        }

        let body = response.text().await?;
        Ok(FetchOutcome::Found(body))
    }
}
