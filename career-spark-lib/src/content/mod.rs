//! Canned content behind the gated routes.

pub mod forecast;
mod insights;
mod quotes;
mod upstream;

pub use forecast::{
    analyze_industries, calculate_power_score, generate_career_blurb, predict_future_roles,
    DemandLevel, Forecast, FutureRole, IndustryOutlook,
};
pub use insights::{random_insight, CAREER_INSIGHTS};
pub use quotes::{fallback_quote, MOTIVATIONAL_QUOTES};
pub use upstream::UpstreamQuotes;
