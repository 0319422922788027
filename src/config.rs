use std::time::Duration;

/// Environment variable overriding the HTTP timeout, in whole seconds.
pub const TIMEOUT_ENV: &str = "RUSTY_CATALOG_FETCH_TIMEOUT_SECS";

/// Settings for fetching shared sheets over HTTP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!("rusty-catalog/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FetchConfig {
    /// Defaults, with the timeout taken from [`TIMEOUT_ENV`] when it holds a
    /// positive integer.
    pub fn from_env() -> Self {
        Self::from_timeout_var(std::env::var(TIMEOUT_ENV).ok().as_deref())
    }

    fn from_timeout_var(value: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = value {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => log::warn!("Ignoring {TIMEOUT_ENV}={raw:?}; expected a positive number of seconds"),
            }
        }
        config
    }
}
