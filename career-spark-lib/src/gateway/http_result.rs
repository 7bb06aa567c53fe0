use http::StatusCode;
use thiserror::Error;

use crate::security::RateLimitOutcome;

/// HTTP result type, T is typically a hyper::Response
/// HttpError is used to generate a JSON error response
pub type HttpResult<T> = std::result::Result<T, HttpError>;

/// Describes things that can go wrong while handling an API request
#[derive(Debug, Error, Clone)]
pub enum HttpError {
    #[error("Invalid or missing API key")]
    Unauthenticated,

    #[error("Admin access required")]
    Forbidden,

    #[error("Rate limit exceeded")]
    RateLimited(RateLimitOutcome),

    #[error("{0}")]
    BadRequest(String),

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    Internal(String),
}

impl HttpError {
    /// Short label used for logging and metrics
    pub fn error_type(&self) -> &'static str {
        match self {
            HttpError::Unauthenticated => "unauthenticated",
            HttpError::Forbidden => "forbidden",
            HttpError::RateLimited(_) => "rate_limited",
            HttpError::BadRequest(_) => "bad_request",
            HttpError::PayloadTooLarge => "payload_too_large",
            HttpError::NotFound => "not_found",
            HttpError::MethodNotAllowed => "method_not_allowed",
            HttpError::Internal(_) => "internal",
        }
    }
}

impl From<&HttpError> for StatusCode {
    fn from(e: &HttpError) -> StatusCode {
        match e {
            HttpError::Unauthenticated => StatusCode::UNAUTHORIZED,
            HttpError::Forbidden => StatusCode::FORBIDDEN,
            HttpError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            HttpError::NotFound => StatusCode::NOT_FOUND,
            HttpError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<HttpError> for StatusCode {
    fn from(e: HttpError) -> StatusCode {
        StatusCode::from(&e)
    }
}

impl From<crate::error::GateError> for HttpError {
    fn from(e: crate::error::GateError) -> Self {
        HttpError::Internal(e.to_string())
    }
}
