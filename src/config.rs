//! Runtime configuration from environment variables.

use std::path::PathBuf;
use std::time::Duration;

/// Hosted store used when `LISTWISE_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "https://66a82f8c53c13f22a3d20940.mockapi.io/gymbeam-assignment";

/// Per-request timeout used when `LISTWISE_TIMEOUT_SECS` is unset.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A configuration variable held an unusable value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The value could not be parsed.
    #[error("invalid {var}={value:?}: {reason}")]
    Invalid {
        /// Variable name.
        var: &'static str,
        /// Offending value.
        value: String,
        /// What was expected.
        reason: &'static str,
    },
    /// Recording and replaying were both requested.
    #[error("LISTWISE_RECORD and LISTWISE_REPLAY cannot be set together")]
    RecordAndReplay,
}

/// Where the store lives and how traffic is captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the store, without a trailing slash.
    pub api_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Record remote traffic into a cassette under this directory.
    pub record_dir: Option<PathBuf>,
    /// Serve remote traffic from this cassette instead of the network.
    pub replay_cassette: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            record_dir: None,
            replay_cassette: None,
        }
    }
}

impl Config {
    /// Reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an unparseable or conflicting value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads configuration through `lookup`; empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an unparseable or conflicting value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(url) = get("LISTWISE_API_URL") {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::Invalid {
                    var: "LISTWISE_API_URL",
                    value: url,
                    reason: "expected an http(s) URL",
                });
            }
            config.api_url = url.trim_end_matches('/').to_string();
        }

        if let Some(raw) = get("LISTWISE_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "LISTWISE_TIMEOUT_SECS",
                        value: raw,
                        reason: "expected a positive number of seconds",
                    })
                }
            }
        }

        config.record_dir = get("LISTWISE_RECORD").map(PathBuf::from);
        config.replay_cassette = get("LISTWISE_REPLAY").map(PathBuf::from);
        if config.record_dir.is_some() && config.replay_cassette.is_some() {
            return Err(ConfigError::RecordAndReplay);
        }

        Ok(config)
    }
}
