use chrono::Utc;
use http::StatusCode;
use http_body_util::{combinators::BoxBody, BodyExt, Full};
use hyper::body::Bytes;
use hyper::Response;
use serde::Serialize;
use serde_json::json;

use crate::error::{GateError, Result};

pub type RespBody = BoxBody<Bytes, hyper::Error>;

/// Build a JSON response with the given status code
pub fn json_response<T: Serialize + ?Sized>(
    status_code: StatusCode,
    value: &T,
) -> Result<Response<RespBody>> {
    let body = serde_json::to_vec(value)?;
    bytes_response(status_code, "application/json", Bytes::from(body))
}

/// Build a response with an explicit content type
pub fn bytes_response(
    status_code: StatusCode,
    content_type: &str,
    body: Bytes,
) -> Result<Response<RespBody>> {
    Response::builder()
        .status(status_code)
        .header(http::header::CONTENT_TYPE, content_type)
        .body(full_body(body))
        .map_err(|e| GateError::Http(format!("Failed to build {content_type} response: {e}")))
}

/// Build the JSON error envelope `{error, timestamp, status}`
pub fn error_response(status_code: StatusCode, message: &str) -> Result<Response<RespBody>> {
    json_response(
        status_code,
        &json!({
            "error": message,
            "timestamp": Utc::now(),
            "status": status_code.as_u16(),
        }),
    )
}

/// Plain-text response that cannot fail to build
pub fn text_response(status_code: StatusCode, text: &'static str) -> Response<RespBody> {
    let mut resp = Response::new(full_body(Bytes::from_static(text.as_bytes())));
    *resp.status_mut() = status_code;
    resp
}

fn full_body(bytes: Bytes) -> RespBody {
    Full::new(bytes).map_err(|never| match never {}).boxed()
}
