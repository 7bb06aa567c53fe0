//! Fixed-window rate limiter.
//!
//! One counter record per partition key, reset lazily on the first access
//! after its window has expired.

use ahash::AHashMap;
use std::sync::Mutex;
use std::time::{Duration, SystemTime};

/// Window length shared by every partition key.
pub const WINDOW: Duration = Duration::from_secs(60);

/// Result of a rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitOutcome {
    /// Request is allowed to proceed.
    Allowed {
        /// Maximum number of requests allowed in the window
        limit: u32,
        /// `limit - count` after this request
        remaining: i64,
        /// When the current window ends
        reset_at: SystemTime,
    },
    /// Request is rate limited and should be rejected.
    Limited {
        /// Maximum number of requests allowed in the window
        limit: u32,
        /// Number of requests remaining (always 0)
        remaining: i64,
        /// When the current window ends
        reset_at: SystemTime,
    },
}

impl RateLimitOutcome {
    /// Returns true if the request is allowed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitOutcome::Allowed { .. })
    }

    /// Returns true if the request is limited.
    pub fn is_limited(&self) -> bool {
        matches!(self, RateLimitOutcome::Limited { .. })
    }

    /// Get the limit value.
    pub fn limit(&self) -> u32 {
        match self {
            RateLimitOutcome::Allowed { limit, .. } => *limit,
            RateLimitOutcome::Limited { limit, .. } => *limit,
        }
    }

    /// Get the remaining count. May be negative; clamp before presenting it.
    pub fn remaining(&self) -> i64 {
        match self {
            RateLimitOutcome::Allowed { remaining, .. } => *remaining,
            RateLimitOutcome::Limited { remaining, .. } => *remaining,
        }
    }

    /// Get the end of the window the check was counted against.
    pub fn reset_at(&self) -> SystemTime {
        match self {
            RateLimitOutcome::Allowed { reset_at, .. } => *reset_at,
            RateLimitOutcome::Limited { reset_at, .. } => *reset_at,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct CounterRecord {
    count: u32,
    window_reset_at: SystemTime,
}

/// Process-wide table of fixed-window counters keyed by partition key.
///
/// Construct one per process and share it behind an `Arc`. The whole
/// check-and-increment sequence runs under a single mutex, so concurrent
/// requests for the same key never over-admit. Counters are local to this
/// process; separate instances do not share them.
///
/// Records are never removed. Key cardinality is bounded by the number of
/// configured credentials.
///
/// # Example
/// ```ignore
/// use career_spark_lib::security::rate_limit::FixedWindowLimiter;
///
/// let limiter = FixedWindowLimiter::new();
/// let outcome = limiter.check_and_consume("user:abcd1234", 20);
/// assert!(outcome.is_allowed());
/// assert_eq!(outcome.remaining(), 19);
/// ```
#[derive(Default)]
pub struct FixedWindowLimiter {
    records: Mutex<AHashMap<String, CounterRecord>>,
}

impl FixedWindowLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one request for `partition_key` against `limit` using the wall clock.
    pub fn check_and_consume(&self, partition_key: &str, limit: u32) -> RateLimitOutcome {
        self.check_and_consume_at(partition_key, limit, SystemTime::now())
    }

    /// Count one request for `partition_key` against `limit` at time `now`.
    ///
    /// A denied request does not increment the counter.
    pub fn check_and_consume_at(
        &self,
        partition_key: &str,
        limit: u32,
        now: SystemTime,
    ) -> RateLimitOutcome {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(record) = records.get_mut(partition_key) {
            if now <= record.window_reset_at {
                if record.count >= limit {
                    return RateLimitOutcome::Limited {
                        limit,
                        remaining: 0,
                        reset_at: record.window_reset_at,
                    };
                }

                record.count = record.count.saturating_add(1);
                return RateLimitOutcome::Allowed {
                    limit,
                    remaining: i64::from(limit) - i64::from(record.count),
                    reset_at: record.window_reset_at,
                };
            }
        }

        // first request for this key, or the previous window has expired
        let window_reset_at = now + WINDOW;
        records.insert(partition_key.to_string(), CounterRecord { count: 1, window_reset_at });
        RateLimitOutcome::Allowed {
            limit,
            remaining: i64::from(limit) - 1,
            reset_at: window_reset_at,
        }
    }

    /// Current count for a key, if a record exists. Expired windows are
    /// reported as-is; the reset only happens on the next check.
    pub fn count(&self, partition_key: &str) -> Option<u32> {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        records.get(partition_key).map(|r| r.count)
    }

    /// Number of partition keys seen so far.
    pub fn tracked_keys(&self) -> usize {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}
