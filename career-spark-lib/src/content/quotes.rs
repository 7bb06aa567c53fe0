use rand::seq::SliceRandom;

/// Motivational quotes served by `GET /api/quotes`.
pub const MOTIVATIONAL_QUOTES: [&str; 10] = [
    "\"Success is not final, failure is not fatal: it is the courage to continue that counts.\" - Winston Churchill",
    "\"The only way to do great work is to love what you do.\" - Steve Jobs",
    "\"Innovation distinguishes between a leader and a follower.\" - Steve Jobs",
    "\"Your work is going to fill a large part of your life, and the only way to be truly satisfied is to do what you believe is great work.\" - Steve Jobs",
    "\"The future depends on what you do today.\" - Mahatma Gandhi",
    "\"Don't be afraid to give up the good to go for the great.\" - John D. Rockefeller",
    "\"The way to get started is to quit talking and begin doing.\" - Walt Disney",
    "\"If you really look closely, most overnight successes took a long time.\" - Steve Jobs",
    "\"The only impossible journey is the one you never begin.\" - Tony Robbins",
    "\"Success is walking from failure to failure with no loss of enthusiasm.\" - Winston Churchill",
];

/// A random entry from [`MOTIVATIONAL_QUOTES`], used when no upstream quote is available.
pub fn fallback_quote() -> Option<&'static str> {
    MOTIVATIONAL_QUOTES.choose(&mut rand::thread_rng()).copied()
}
