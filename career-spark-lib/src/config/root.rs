use serde::Deserialize;
use std::net::SocketAddr;

use super::auth::AuthConfig;
use super::quotes::QuotesConfig;
use super::rate_limit::RateLimitConfig;
use super::telemetry::{LoggingConfig, TelemetryConfig};
use super::timeout::TimeoutConfig;

/// Main configuration structure
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Address and port to listen on
    /// Example: "0.0.0.0:3000" or "127.0.0.1:8080"
    pub listen: SocketAddr,
    /// API secrets accepted by the key validator
    /// At least one of the two must be set (here or through the environment)
    #[serde(default)]
    pub auth: AuthConfig,
    /// Per-route request limits for the 60 second window
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Timeout and request size configuration
    #[serde(default)]
    pub timeout: TimeoutConfig,
    /// Upstream quote source
    #[serde(default)]
    pub quotes: QuotesConfig,
    /// Telemetry configuration
    /// Controls the metrics and health check server
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
