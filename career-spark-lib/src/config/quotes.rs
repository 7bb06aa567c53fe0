use serde::Deserialize;

/// Upstream quote source for `GET /api/quotes`
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct QuotesConfig {
    /// URL returning a JSON object with `content` and `author`
    /// When unset, quotes come from the built-in table only
    #[serde(default)]
    pub upstream_url: Option<String>,
    /// Time allowed for the upstream request before falling back, in milliseconds
    /// Default: 2000
    #[serde(default = "default_upstream_timeout_ms")]
    pub upstream_timeout_ms: u64,
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self { upstream_url: None, upstream_timeout_ms: default_upstream_timeout_ms() }
    }
}

fn default_upstream_timeout_ms() -> u64 {
    2000
}
