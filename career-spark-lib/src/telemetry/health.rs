use hyper::Response;
use hyper::StatusCode;
use serde_json::json;

use crate::error::Result;
use crate::gateway::response::{json_response, RespBody};

/// Health check response - always returns 200 if process is running
pub fn health_check_response() -> Result<Response<RespBody>> {
    json_response(StatusCode::OK, &json!({"status": "healthy"}))
}

/// Readiness check - verifies that the API listener is accepting connections
/// Returns 200 while accepting, 503 before startup and during shutdown
pub fn ready_check_response(accepting: bool) -> Result<Response<RespBody>> {
    if accepting {
        json_response(StatusCode::OK, &json!({"status": "ready"}))
    } else {
        json_response(
            StatusCode::SERVICE_UNAVAILABLE,
            &json!({"status": "not_ready", "reason": "listener_not_accepting"}),
        )
    }
}

/// Liveness check - always returns 200 if process is running
pub fn live_check_response() -> Result<Response<RespBody>> {
    json_response(StatusCode::OK, &json!({"status": "alive"}))
}
