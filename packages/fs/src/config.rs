//! File-based configuration.
//!
//! ```json
//! {
//!   "port": 8080,
//!   "user_agent": "httpfs/0.0.1",
//!   "max_response_size": 2097152,
//!   "timeout_secs": 10,
//!   "max_depth": 20,
//!   "max_path_len": 256
//! }
//! ```
//!
//! Every field is optional.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use httpfs_http::FetchConfig;
use httpfs_namespace::PathLimits;

/// Errors loading a configuration file.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpFsConfig {
    pub port: u16,
    pub user_agent: String,
    pub max_response_size: usize,
    /// Zero disables every deadline.
    pub timeout_secs: u64,
    pub max_depth: usize,
    pub max_path_len: usize,
}

impl Default for HttpFsConfig {
    fn default() -> Self {
        let limits = PathLimits::default();
        Self {
            port: FetchConfig::DEFAULT_PORT,
            user_agent: FetchConfig::DEFAULT_USER_AGENT.to_string(),
            max_response_size: FetchConfig::DEFAULT_MAX_RESPONSE_SIZE,
            timeout_secs: FetchConfig::DEFAULT_TIMEOUT.as_secs(),
            max_depth: limits.max_depth,
            max_path_len: limits.max_path_len,
        }
    }
}

impl HttpFsConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig::default()
            .with_port(self.port)
            .with_user_agent(self.user_agent.clone())
            .with_max_response_size(self.max_response_size)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }

    pub fn path_limits(&self) -> PathLimits {
        PathLimits::default()
            .with_max_depth(self.max_depth)
            .with_max_path_len(self.max_path_len)
    }
}
