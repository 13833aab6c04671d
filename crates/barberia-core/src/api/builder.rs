//! Builder for creating and configuring ApiClient instances.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use log::debug;
use reqwest::Url;

use super::ApiClient;
use crate::{
    error::{BookingError, Result},
    session::SessionStore,
};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Builder for creating and configuring ApiClient instances.
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    session_path: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL, e.g. `http://localhost:8000/api/v1`.
    pub fn with_base_url<S: Into<String>>(mut self, base_url: Option<S>) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = Some(base_url.into());
        }
        self
    }

    /// Sets a custom session file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/barberia/session.db` or
    /// `~/.local/share/barberia/session.db`
    pub fn with_session_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.session_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the per-request timeout. Requests exceeding it fail with a
    /// network error.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        if let Some(timeout) = timeout {
            self.timeout = Some(timeout);
        }
        self
    }

    /// Builds the configured client.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Configuration` if the base URL is not an
    /// http(s) URL or the HTTP client cannot be created, and the session
    /// store's errors if the session file cannot be opened.
    pub async fn build(self) -> Result<ApiClient> {
        let base_url = Self::validate_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        let session_path = match self.session_path {
            Some(path) => path,
            None => SessionStore::default_path()?,
        };
        let session = SessionStore::open(&session_path).await?;

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BookingError::Configuration {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        debug!(
            "API client targeting {base_url} (timeout {}s, session {})",
            timeout.as_secs(),
            session_path.display()
        );

        Ok(ApiClient::new(http, base_url, session))
    }

    fn validate_base_url(raw: &str) -> Result<String> {
        let url = Url::parse(raw).map_err(|e| BookingError::Configuration {
            message: format!("Invalid API base URL '{raw}': {e}"),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(BookingError::Configuration {
                message: format!("API base URL must use http or https, got '{raw}'"),
            });
        }

        Ok(raw.trim_end_matches('/').to_string())
    }
}
