use http::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::{SystemTime, UNIX_EPOCH};

use super::RateLimitOutcome;

pub const RATE_LIMIT_LIMIT: &str = "x-ratelimit-limit";
pub const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";
pub const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

/// Project an outcome into the three rate limit response headers.
///
/// `remaining` is clamped at zero and the reset time is expressed in Unix
/// epoch seconds, rounded up.
pub fn rate_limit_headers(outcome: &RateLimitOutcome) -> [(HeaderName, HeaderValue); 3] {
    let remaining = outcome.remaining().max(0);
    [
        (HeaderName::from_static(RATE_LIMIT_LIMIT), HeaderValue::from(outcome.limit())),
        (HeaderName::from_static(RATE_LIMIT_REMAINING), HeaderValue::from(remaining)),
        (
            HeaderName::from_static(RATE_LIMIT_RESET),
            HeaderValue::from(epoch_seconds_ceil(outcome.reset_at())),
        ),
    ]
}

/// Insert the rate limit headers into `headers`, replacing existing values.
pub fn apply_rate_limit_headers(headers: &mut HeaderMap, outcome: &RateLimitOutcome) {
    for (name, value) in rate_limit_headers(outcome) {
        headers.insert(name, value);
    }
}

fn epoch_seconds_ceil(at: SystemTime) -> u64 {
    match at.duration_since(UNIX_EPOCH) {
        Ok(d) if d.subsec_nanos() > 0 => d.as_secs().saturating_add(1),
        Ok(d) => d.as_secs(),
        Err(_) => 0,
    }
}
