//! Blocking HTTP source for remote question documents.

use quiz_core::{Error, Result, SlideSource};
use std::time::Duration;

/// Default deadline for fetching a remote document.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches the question document over HTTP with a bounded wait.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    timeout: Duration,
}

impl HttpSource {
    /// Create a source for the given URL with the default timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the deadline for the whole request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl SlideSource for HttpSource {
    fn fetch(&self) -> Result<String> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| Error::Fetch(e.to_string()))?;

        let response = client.get(&self.url).send().map_err(map_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("HTTP {} from {}", status, self.url)));
        }

        response.text().map_err(map_error)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

fn map_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout
    } else {
        Error::Fetch(e.to_string())
    }
}

/// Whether a source argument names a remote document.
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}
