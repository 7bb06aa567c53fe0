pub mod api_key;
pub mod key_registry;
pub mod rate_limit;

pub use api_key::{
    extract_credential, partition_key, AuthorizationResult, KeyValidator, Role, API_KEY_HEADER,
    API_KEY_QUERY_PARAM,
};
pub use key_registry::{IssuedKey, KeyRegistry, KeySummary};
pub use rate_limit::{apply_rate_limit_headers, FixedWindowLimiter, RateLimitOutcome};
