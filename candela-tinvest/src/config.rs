use std::fmt;
use std::time::Duration;

/// Public REST gateway of the T-Invest API.
pub const DEFAULT_BASE_URL: &str = "https://invest-public-api.tinkoff.ru/rest";

/// Connection settings for [`crate::TinvestConnector`].
///
/// The token is a caller-supplied value; nothing here reads the environment.
#[derive(Clone)]
pub struct TinvestConfig {
    /// API token sent as `Authorization: Bearer <token>`.
    pub token: String,
    /// Gateway root without a trailing service path.
    pub base_url: String,
    /// Per-HTTP-request timeout.
    pub timeout: Duration,
}

impl TinvestConfig {
    /// Settings for the public gateway with a 30 second request timeout.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Point the connector at another gateway (sandbox, proxy, test server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the per-request HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for TinvestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TinvestConfig")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
