use std::fs;
use std::path::Path;

use secrecy::Secret;

use crate::config::{validate, Config};
use crate::error::{GateError, Result};

/// Environment variable overriding `auth.admin_secret`
pub const ADMIN_SECRET_ENV: &str = "ADMIN_API_KEY";
/// Environment variable overriding `auth.user_secret`
pub const USER_SECRET_ENV: &str = "CAREER_SPARK_API_KEY";

/// Load, override from the process environment, and validate a TOML config file.
pub fn load_from_path<P: AsRef<Path>>(p: P) -> Result<Config> {
    load_from_path_with_env(p, |name| std::env::var(name).ok())
}

/// Same as [`load_from_path`] with an injectable environment lookup.
pub fn load_from_path_with_env<P, F>(p: P, env: F) -> Result<Config>
where
    P: AsRef<Path>,
    F: Fn(&str) -> Option<String>,
{
    let txt = fs::read_to_string(p)
        .map_err(|e| GateError::Config(format!("Failed to read config file: {e}")))?;
    let mut cfg = parse_config(&txt)?;

    apply_env_overrides(&mut cfg, env);
    validate(&cfg)?;

    Ok(cfg)
}

/// Parse a TOML document without environment overrides or validation.
pub fn parse_config(txt: &str) -> Result<Config> {
    toml::from_str(txt).map_err(|e| GateError::Config(format!("Failed to parse config: {e}")))
}

fn apply_env_overrides<F>(cfg: &mut Config, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    // unset and empty variables leave the file value in place
    if let Some(value) = env(ADMIN_SECRET_ENV).filter(|v| !v.is_empty()) {
        cfg.auth.admin_secret = Some(Secret::new(value));
    }
    if let Some(value) = env(USER_SECRET_ENV).filter(|v| !v.is_empty()) {
        cfg.auth.user_secret = Some(Secret::new(value));
    }
}
