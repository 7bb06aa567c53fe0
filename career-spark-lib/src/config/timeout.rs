use serde::Deserialize;

/// Timeout and request size configuration
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Graceful shutdown timeout in seconds
    /// Default: 30
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_secs: u64,
    /// Total connection handling timeout in seconds
    /// Maximum time a single connection may stay open
    /// Default: 300 seconds (5 minutes)
    #[serde(default = "default_connection_handling_timeout")]
    pub connection_handling_secs: u64,
    /// Maximum accepted request body size in bytes
    /// Default: 65536 (64 KiB)
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            shutdown_secs: default_shutdown_timeout(),
            connection_handling_secs: default_connection_handling_timeout(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_shutdown_timeout() -> u64 {
    30
}

fn default_connection_handling_timeout() -> u64 {
    300
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}
