//! Fetch configuration.

use std::time::Duration;

/// Settings for one [`Fetcher`](crate::Fetcher).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// TCP port every host is contacted on.
    pub port: u16,
    /// Value of the `User-Agent` request header.
    pub user_agent: String,
    /// Capacity of the response buffer, headers included.
    pub max_response_size: usize,
    /// Deadline for name resolution, for connecting, and for each
    /// individual send or receive call.
    pub timeout: Duration,
}

impl FetchConfig {
    pub const DEFAULT_PORT: u16 = 80;
    pub const DEFAULT_USER_AGENT: &'static str = "httpfs/0.0.1";
    pub const DEFAULT_MAX_RESPONSE_SIZE: usize = 2 * 1024 * 1024;
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_max_response_size(mut self, max_response_size: usize) -> Self {
        self.max_response_size = max_response_size;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            port: Self::DEFAULT_PORT,
            user_agent: Self::DEFAULT_USER_AGENT.to_string(),
            max_response_size: Self::DEFAULT_MAX_RESPONSE_SIZE,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_wire_constants() {
        let config = FetchConfig::default();
        assert_eq!(config.port, 80);
        assert_eq!(config.user_agent, "httpfs/0.0.1");
        assert_eq!(config.max_response_size, 2 * 1024 * 1024);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn builder_overrides() {
        let config = FetchConfig::default()
            .with_port(8080)
            .with_user_agent("probe/1.0")
            .with_max_response_size(64)
            .with_timeout(Duration::from_millis(250));

        assert_eq!(config.port, 8080);
        assert_eq!(config.user_agent, "probe/1.0");
        assert_eq!(config.max_response_size, 64);
        assert_eq!(config.timeout, Duration::from_millis(250));
    }
}
