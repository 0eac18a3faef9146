//! Client configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::game::StrategyId;

/// Default timeout for a single request.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default delay between replayed frames.
const DEFAULT_FRAME_DELAY: Duration = Duration::from_secs(1);

/// Configuration for a session client and its controller.
///
/// The only required field is `base_url`; all others have sensible defaults.
///
/// # Example
///
/// ```
/// use othello_session_client::ClientConfig;
/// use othello_session_client::game::StrategyId;
/// use std::time::Duration;
///
/// let config = ClientConfig::new("http://localhost:8080")
///     .with_frame_delay(Duration::from_millis(500))
///     .with_default_strategy(StrategyId::greedy());
/// assert_eq!(config.base_url, "http://localhost:8080");
/// assert_eq!(config.default_strategy.as_str(), "Greedy");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server origin, e.g. `http://localhost:8080`. Trailing slashes are ignored.
    pub base_url: String,
    /// Timeout applied to each request by the HTTP transport.
    ///
    /// Defaults to **10 seconds**.
    pub request_timeout: Duration,
    /// Delay between consecutive frames during playback. The first frame of
    /// a sequence is always shown immediately.
    ///
    /// Defaults to **1 second**.
    pub frame_delay: Duration,
    /// Strategy used when a game is started without an explicit one.
    pub default_strategy: StrategyId,
    /// File holding the persistent client identity. `None` uses a fresh
    /// identity for the lifetime of the process.
    pub identity_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Create a new configuration for the given server with default values.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            frame_delay: DEFAULT_FRAME_DELAY,
            default_strategy: StrategyId::default(),
            identity_path: None,
        }
    }

    /// Set the per-request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the delay between replayed frames.
    #[must_use]
    pub fn with_frame_delay(mut self, delay: Duration) -> Self {
        self.frame_delay = delay;
        self
    }

    /// Set the strategy used by default when starting a game.
    #[must_use]
    pub fn with_default_strategy(mut self, strategy: StrategyId) -> Self {
        self.default_strategy = strategy;
        self
    }

    /// Persist the client identity at `path`.
    #[must_use]
    pub fn with_identity_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.identity_path = Some(path.into());
        self
    }
}
