//! Resource fetching abstraction
//!
//! A trait-based abstraction for fetching external resources (the
//! stylesheet and the font binaries) so the pipeline stays agnostic about
//! transport and tests can substitute an in-memory fetcher.
//!
//! The [`HttpFetcher`] implementation is fully blocking, matching the
//! sequential one-shot nature of the tool.

use crate::error::{FetchError, Result};
use std::time::Duration;

/// Default User-Agent header for HTTP fetches.
pub const DEFAULT_USER_AGENT: &str = concat!("fontmirror/", env!("CARGO_PKG_VERSION"));

/// Default timeout applied to each request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Largest response body we are willing to read (fonts are ~1 MB).
const MAX_RESPONSE_SIZE: u64 = 64 * 1024 * 1024;

/// Fetches the bytes behind a URL.
pub trait ResourceFetcher {
  fn fetch(&self, url: &str) -> Result<Vec<u8>>;

  /// Fetches a URL expected to hold UTF-8 text.
  fn fetch_text(&self, url: &str) -> Result<String> {
    let bytes = self.fetch(url)?;
    String::from_utf8(bytes).map_err(|_| {
      FetchError::InvalidUtf8 {
        url: url.to_string(),
      }
      .into()
    })
  }
}

/// Blocking HTTP fetcher backed by `ureq`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
  timeout: Duration,
  user_agent: String,
}

impl Default for HttpFetcher {
  fn default() -> Self {
    Self::new()
  }
}

impl HttpFetcher {
  pub fn new() -> Self {
    Self {
      timeout: DEFAULT_TIMEOUT,
      user_agent: DEFAULT_USER_AGENT.to_string(),
    }
  }

  /// Set the per-request timeout
  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }

  /// Set the User-Agent header
  pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
    self.user_agent = user_agent.into();
    self
  }
}

impl ResourceFetcher for HttpFetcher {
  fn fetch(&self, url: &str) -> Result<Vec<u8>> {
    let config = ureq::Agent::config_builder()
      .timeout_global(Some(self.timeout))
      .build();
    let agent: ureq::Agent = config.into();

    let mut response = agent
      .get(url)
      .header("User-Agent", &self.user_agent)
      .call()
      .map_err(|err| fetch_error(url, err))?;

    log::debug!("GET {url} -> {}", response.status());

    let bytes = response
      .body_mut()
      .with_config()
      .limit(MAX_RESPONSE_SIZE)
      .read_to_vec()
      .map_err(|err| FetchError::Transport {
        url: url.to_string(),
        reason: err.to_string(),
      })?;
    Ok(bytes)
  }
}

fn fetch_error(url: &str, err: ureq::Error) -> crate::error::Error {
  match err {
    ureq::Error::StatusCode(status) => FetchError::Status {
      url: url.to_string(),
      status,
    }
    .into(),
    other => FetchError::Transport {
      url: url.to_string(),
      reason: other.to_string(),
    }
    .into(),
  }
}
