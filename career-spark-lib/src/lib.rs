#![forbid(unsafe_code)]

pub mod config;
pub mod content;
pub mod error;
pub mod gateway;
pub mod security;
pub mod telemetry;

pub use config::{load_from_path, Config};
pub use error::{GateError, Result};
pub use gateway::{handle_api_request, run, serve, AppState};
pub use security::{FixedWindowLimiter, KeyValidator, Role};
