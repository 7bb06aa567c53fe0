use thiserror::Error;

/// Errors that can occur while configuring or running the gate
#[derive(Error, Debug)]
pub enum GateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No API secret configured (set auth.admin_secret or auth.user_secret)")]
    NoSecrets,
}

pub type Result<T> = std::result::Result<T, GateError>;
