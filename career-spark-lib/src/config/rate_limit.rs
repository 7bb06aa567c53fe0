use serde::Deserialize;

/// Per-route request limits
///
/// Every limit applies to one partition key (role + credential suffix) within
/// the fixed 60 second window.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// `GET /api/insights`
    /// Default: 60
    #[serde(default = "default_standard_limit")]
    pub insights: u32,
    /// `GET /api/quotes`
    /// Default: 60
    #[serde(default = "default_standard_limit")]
    pub quotes: u32,
    /// `POST /api/forecast` under a user credential
    /// Default: 20
    #[serde(default = "default_forecast_user_limit")]
    pub forecast_user: u32,
    /// `POST /api/forecast` under an admin credential
    /// Default: 50
    #[serde(default = "default_forecast_admin_limit")]
    pub forecast_admin: u32,
    /// `/api/admin/keys` (admin only)
    /// Default: 100
    #[serde(default = "default_admin_limit")]
    pub admin: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            insights: default_standard_limit(),
            quotes: default_standard_limit(),
            forecast_user: default_forecast_user_limit(),
            forecast_admin: default_forecast_admin_limit(),
            admin: default_admin_limit(),
        }
    }
}

fn default_standard_limit() -> u32 {
    60
}

fn default_forecast_user_limit() -> u32 {
    20
}

fn default_forecast_admin_limit() -> u32 {
    50
}

fn default_admin_limit() -> u32 {
    100
}
