use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

/// API secret configuration
///
/// Both secrets are compared verbatim against the credential presented by
/// the caller. `Secret` keeps them out of `Debug` output and logs.
#[derive(Debug, Deserialize, Default)]
pub struct AuthConfig {
    /// Secret granting the `admin` role
    /// Overridden by the `ADMIN_API_KEY` environment variable
    #[serde(default)]
    pub admin_secret: Option<Secret<String>>,
    /// Secret granting the `user` role
    /// Overridden by the `CAREER_SPARK_API_KEY` environment variable
    #[serde(default)]
    pub user_secret: Option<Secret<String>>,
}

impl AuthConfig {
    pub fn new(admin_secret: Option<&str>, user_secret: Option<&str>) -> Self {
        Self {
            admin_secret: admin_secret.map(|s| Secret::new(s.to_string())),
            user_secret: user_secret.map(|s| Secret::new(s.to_string())),
        }
    }

    pub fn admin_secret(&self) -> Option<&str> {
        self.admin_secret.as_ref().map(|s| s.expose_secret().as_str())
    }

    pub fn user_secret(&self) -> Option<&str> {
        self.user_secret.as_ref().map(|s| s.expose_secret().as_str())
    }

    /// True when both secrets are configured to the same value.
    /// The admin role wins in that case.
    pub fn secrets_collide(&self) -> bool {
        matches!((self.admin_secret(), self.user_secret()), (Some(a), Some(u)) if a == u)
    }
}
