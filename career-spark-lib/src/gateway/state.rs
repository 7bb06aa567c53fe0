use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::config::{Config, RateLimitConfig, TimeoutConfig};
use crate::content::UpstreamQuotes;
use crate::error::Result;
use crate::security::{FixedWindowLimiter, KeyRegistry, KeyValidator, Role};
use crate::telemetry::Metrics;

/// Shared state handed to every request handler.
///
/// Built once at startup; tests build a fresh one per case.
pub struct AppState {
    pub validator: KeyValidator,
    pub limiter: Arc<FixedWindowLimiter>,
    pub registry: KeyRegistry,
    pub limits: RateLimitConfig,
    pub timeouts: TimeoutConfig,
    /// External quote service; `None` serves the built-in table only
    pub quote_source: Option<UpstreamQuotes>,
    pub metrics: Option<Arc<Metrics>>,
    /// True while the API listener accepts connections (drives `/ready`)
    pub accepting: Arc<AtomicBool>,
}

impl AppState {
    pub fn from_config(config: &Config, metrics: Option<Arc<Metrics>>) -> Result<Self> {
        Ok(Self {
            validator: KeyValidator::from_config(&config.auth),
            limiter: Arc::new(FixedWindowLimiter::new()),
            registry: KeyRegistry::new(&config.auth),
            limits: config.rate_limit,
            timeouts: config.timeout,
            quote_source: UpstreamQuotes::from_config(&config.quotes)?,
            metrics,
            accepting: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn forecast_limit(&self, role: Role) -> u32 {
        match role {
            Role::Admin => self.limits.forecast_admin,
            Role::User => self.limits.forecast_user,
        }
    }
}
