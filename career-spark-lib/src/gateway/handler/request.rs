use bytes::Bytes;
use http::{Method, StatusCode};
use hyper::body::Body;
use hyper::{Request, Response};
use serde_json::json;
use tracing::{debug, warn};

use super::routes;
use crate::gateway::http_result::{HttpError, HttpResult};
use crate::gateway::response::{error_response, json_response, text_response, RespBody};
use crate::gateway::AppState;
use crate::security::apply_rate_limit_headers;

/// Metrics label for paths outside the route table
const UNMATCHED_ROUTE: &str = "unmatched";

/// Handle one API request end to end.
///
/// Never fails: every [`HttpError`] is rendered into its JSON response here.
pub async fn handle_api_request<B>(req: Request<B>, state: &AppState) -> Response<RespBody>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let route = route_label(req.uri().path());

    let response = match dispatch(req, state).await {
        Ok(resp) => resp,
        Err(e) => {
            debug!(%method, route, error_type = e.error_type(), "request rejected");
            error_into_response(&e)
        }
    };

    if let Some(m) = &state.metrics {
        let status = response.status().as_u16();
        m.record_request(method.as_str(), status, route);
        m.record_request_duration(start.elapsed().as_secs_f64(), method.as_str(), status, route);
    }

    response
}

async fn dispatch<B>(req: Request<B>, state: &AppState) -> HttpResult<Response<RespBody>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let (parts, body) = req.into_parts();
    let headers = &parts.headers;
    let query = parts.uri.query();
    let method = &parts.method;

    match parts.uri.path() {
        routes::STATUS if method == Method::GET => routes::status(state, headers, query),
        routes::INSIGHTS if method == Method::GET => routes::insights(state, headers, query),
        routes::QUOTES if method == Method::GET => routes::quotes(state, headers, query).await,
        routes::FORECAST if method == Method::GET => routes::forecast_docs(state),
        routes::FORECAST if method == Method::POST => {
            routes::forecast(state, headers, query, body).await
        }
        routes::ADMIN_KEYS if method == Method::GET => routes::list_keys(state, headers, query),
        routes::ADMIN_KEYS if method == Method::POST => {
            routes::issue_key(state, headers, query, body).await
        }
        path if route_label(path) != UNMATCHED_ROUTE => Err(HttpError::MethodNotAllowed),
        _ => Err(HttpError::NotFound),
    }
}

/// Render an error as the response the client sees.
///
/// Rate-limited responses carry the limit headers and a bare `{"error"}` body;
/// everything else uses the `{error, timestamp, status}` envelope.
pub fn error_into_response(e: &HttpError) -> Response<RespBody> {
    let status = StatusCode::from(e);
    let built = match e {
        HttpError::RateLimited(outcome) => {
            json_response(status, &json!({ "error": e.to_string() })).map(|mut resp| {
                apply_rate_limit_headers(resp.headers_mut(), outcome);
                resp
            })
        }
        _ => error_response(status, &e.to_string()),
    };

    built.unwrap_or_else(|err| {
        warn!(error = %err, "failed to build error response");
        text_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    })
}

fn route_label(path: &str) -> &'static str {
    match path {
        routes::STATUS => routes::STATUS,
        routes::INSIGHTS => routes::INSIGHTS,
        routes::QUOTES => routes::QUOTES,
        routes::FORECAST => routes::FORECAST,
        routes::ADMIN_KEYS => routes::ADMIN_KEYS,
        _ => UNMATCHED_ROUTE,
    }
}
