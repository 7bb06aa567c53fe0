mod auth;
mod loader;
mod quotes;
mod rate_limit;
mod root;
mod telemetry;
mod timeout;
mod validator;

pub use auth::AuthConfig;
pub use loader::{
    load_from_path, load_from_path_with_env, parse_config, ADMIN_SECRET_ENV, USER_SECRET_ENV,
};
pub use quotes::QuotesConfig;
pub use rate_limit::RateLimitConfig;
pub use root::Config;
pub use telemetry::{LoggingConfig, TelemetryConfig};
pub use timeout::TimeoutConfig;
pub use validator::validate;
