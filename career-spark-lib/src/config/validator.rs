use crate::config::Config;
use crate::error::{GateError, Result};

pub fn validate(config: &Config) -> Result<()> {
    let admin = config.auth.admin_secret();
    let user = config.auth.user_secret();

    if admin.is_none() && user.is_none() {
        return Err(GateError::NoSecrets);
    }
    if admin.is_some_and(str::is_empty) {
        return Err(GateError::Config("auth.admin_secret cannot be empty".into()));
    }
    if user.is_some_and(str::is_empty) {
        return Err(GateError::Config("auth.user_secret cannot be empty".into()));
    }

    let limits = &config.rate_limit;
    for (name, value) in [
        ("insights", limits.insights),
        ("quotes", limits.quotes),
        ("forecast_user", limits.forecast_user),
        ("forecast_admin", limits.forecast_admin),
        ("admin", limits.admin),
    ] {
        if value == 0 {
            return Err(GateError::Config(format!("rate_limit.{name} must be > 0")));
        }
    }

    if config.timeout.max_body_bytes == 0 {
        return Err(GateError::Config("timeout.max_body_bytes must be > 0".into()));
    }
    if config.timeout.connection_handling_secs == 0 {
        return Err(GateError::Config("timeout.connection_handling_secs must be > 0".into()));
    }

    if let Some(url) = &config.quotes.upstream_url {
        match reqwest::Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => {
                return Err(GateError::Config(format!(
                    "quotes.upstream_url must use http or https, got '{}'",
                    parsed.scheme()
                )))
            }
            Err(e) => {
                return Err(GateError::Config(format!("quotes.upstream_url is invalid: {e}")))
            }
        }
    }
    if config.quotes.upstream_timeout_ms == 0 {
        return Err(GateError::Config("quotes.upstream_timeout_ms must be > 0".into()));
    }

    Ok(())
}
