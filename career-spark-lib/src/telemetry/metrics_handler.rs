use bytes::Bytes;
use hyper::{Response, StatusCode};
use prometheus::{Encoder, Registry, TextEncoder};

use crate::error::{GateError, Result};
use crate::gateway::response::{bytes_response, RespBody};

/// Render every metric family in `registry` in the Prometheus text format
pub fn handle_metrics(registry: &Registry) -> Result<Response<RespBody>> {
    let encoder = TextEncoder::new();
    let exposition = encoder
        .encode_to_string(&registry.gather())
        .map_err(|e| GateError::Http(format!("Failed to encode metrics: {e}")))?;

    bytes_response(StatusCode::OK, encoder.format_type(), Bytes::from(exposition))
}
