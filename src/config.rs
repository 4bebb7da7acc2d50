//! Client configuration
//!
//! Built once at startup and handed to [`Fetcher`](crate::Fetcher); nothing
//! in the crate reads configuration from anywhere else.
//!
//! ## Environment
//!
//! - `FFBINARIES_API_URL` - catalog base URL (default: the public ffbinaries API)
//! - `FFBINARIES_HTTP_TIMEOUT` - read timeout in seconds, clamped to 5-300

use std::time::Duration;

/// Public ffbinaries version endpoint. Requests go to `<base>/<version>`.
pub const DEFAULT_API_URL: &str = "https://ffbinaries.com/api/v1/version";

/// Default connect timeout in seconds
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

const MIN_TIMEOUT_SECS: u64 = 5;
const MAX_TIMEOUT_SECS: u64 = 300;

/// Transport and endpoint settings shared by the catalog and artifact requests.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub connect_timeout: Duration,
    /// Per-read timeout. `None` leaves long downloads unbounded.
    pub read_timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            read_timeout: None,
            user_agent: concat!("ffbinaries/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Defaults overridden by `FFBINARIES_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the
    /// `FFBINARIES_*` keys. Blank or unparsable values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup("FFBINARIES_API_URL")
            && !url.trim().is_empty()
        {
            config.api_url = url.trim().to_string();
        }
        if let Some(secs) =
            lookup("FFBINARIES_HTTP_TIMEOUT").and_then(|s| s.trim().parse::<u64>().ok())
        {
            config = config.with_read_timeout_secs(secs);
        }
        config
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the read timeout, clamped to a sane range (5-300 seconds).
    pub fn with_read_timeout_secs(mut self, secs: u64) -> Self {
        self.read_timeout = Some(Duration::from_secs(
            secs.clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS),
        ));
        self
    }

    pub(crate) fn build_agent(&self) -> ureq::Agent {
        let mut builder = ureq::AgentBuilder::new()
            .timeout_connect(self.connect_timeout)
            .user_agent(&self.user_agent);
        if let Some(timeout) = self.read_timeout {
            builder = builder.timeout_read(timeout);
        }
        builder.build()
    }
}
