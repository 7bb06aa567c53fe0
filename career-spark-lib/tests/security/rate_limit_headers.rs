use career_spark_lib::security::rate_limit::{
    apply_rate_limit_headers, rate_limit_headers, RateLimitOutcome, RATE_LIMIT_LIMIT,
    RATE_LIMIT_REMAINING, RATE_LIMIT_RESET,
};
use http::HeaderMap;
use std::time::{Duration, UNIX_EPOCH};

#[test]
fn test_negative_remaining_is_clamped() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let outcome = RateLimitOutcome::Allowed {
        limit: 60,
        remaining: -3,
        reset_at: UNIX_EPOCH + Duration::from_secs(1_700_000_000),
    };

    let [limit, remaining, reset] = rate_limit_headers(&outcome);
    assert_eq!(limit.0.as_str(), RATE_LIMIT_LIMIT);
    assert_eq!(limit.1.to_str()?, "60");
    assert_eq!(remaining.0.as_str(), RATE_LIMIT_REMAINING);
    assert_eq!(remaining.1.to_str()?, "0");
    assert_eq!(reset.0.as_str(), RATE_LIMIT_RESET);
    assert_eq!(reset.1.to_str()?, "1700000000");
    Ok(())
}

#[test]
fn test_reset_rounds_up_to_whole_seconds() -> Result<(), Box<dyn std::error::Error + Send + Sync>>
{
    let outcome = RateLimitOutcome::Limited {
        limit: 20,
        remaining: 0,
        reset_at: UNIX_EPOCH + Duration::from_millis(1_700_000_000_250),
    };

    let mut headers = HeaderMap::new();
    apply_rate_limit_headers(&mut headers, &outcome);

    assert_eq!(headers.get("X-RateLimit-Limit").ok_or("limit missing")?, "20");
    assert_eq!(headers.get("X-RateLimit-Remaining").ok_or("remaining missing")?, "0");
    assert_eq!(headers.get("X-RateLimit-Reset").ok_or("reset missing")?, "1700000001");
    Ok(())
}

#[test]
fn test_apply_replaces_existing_values() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut headers = HeaderMap::new();
    headers.insert(RATE_LIMIT_REMAINING, "99".parse()?);

    let outcome = RateLimitOutcome::Allowed {
        limit: 100,
        remaining: 42,
        reset_at: UNIX_EPOCH + Duration::from_secs(10),
    };
    apply_rate_limit_headers(&mut headers, &outcome);

    assert_eq!(headers.get_all(RATE_LIMIT_REMAINING).iter().count(), 1);
    assert_eq!(headers.get(RATE_LIMIT_REMAINING).ok_or("remaining missing")?, "42");
    Ok(())
}
