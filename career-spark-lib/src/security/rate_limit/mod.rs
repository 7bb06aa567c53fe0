//! Rate limiting for Career Spark.
//!
//! A fixed-window counter per partition key:
//!
//! - The first request for a key opens a 60 second window with `count = 1`.
//! - Requests inside the window increment the count until it reaches the
//!   route's limit; further requests are denied without incrementing.
//! - The first request after the window has ended resets the record
//!   (lazy reset, no background sweep).
//!
//! # Example Usage
//!
//! ```ignore
//! use career_spark_lib::security::rate_limit::{FixedWindowLimiter, RateLimitOutcome};
//!
//! let limiter = FixedWindowLimiter::new();
//!
//! match limiter.check_and_consume("admin:12345678", 50) {
//!     RateLimitOutcome::Allowed { remaining, .. } => {
//!         println!("Request allowed, {remaining} remaining");
//!     }
//!     RateLimitOutcome::Limited { reset_at, .. } => {
//!         println!("Rate limited until {reset_at:?}");
//!         // Return 429 Too Many Requests
//!     }
//! }
//! ```

mod headers;
mod limiter;

pub use headers::{
    apply_rate_limit_headers, rate_limit_headers, RATE_LIMIT_LIMIT, RATE_LIMIT_REMAINING,
    RATE_LIMIT_RESET,
};
pub use limiter::{FixedWindowLimiter, RateLimitOutcome, WINDOW};
