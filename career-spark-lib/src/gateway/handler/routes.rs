use bytes::Bytes;
use chrono::Utc;
use http::{HeaderMap, StatusCode};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::Body;
use hyper::Response;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use super::gate::{check_access, Access, Admission};
use crate::content::{fallback_quote, random_insight, Forecast};
use crate::gateway::http_result::{HttpError, HttpResult};
use crate::gateway::response::{json_response, RespBody};
use crate::gateway::AppState;
use crate::security::{
    apply_rate_limit_headers, extract_credential, Role, API_KEY_HEADER, API_KEY_QUERY_PARAM,
};

pub const STATUS: &str = "/api/status";
pub const INSIGHTS: &str = "/api/insights";
pub const QUOTES: &str = "/api/quotes";
pub const FORECAST: &str = "/api/forecast";
pub const ADMIN_KEYS: &str = "/api/admin/keys";

pub const API_VERSION: &str = "1.0.0";

/// Advertised hourly allowance; informational only, never enforced.
const REQUESTS_PER_HOUR: u32 = 1000;

/// `GET /api/status` - ungated service description
pub fn status(
    state: &AppState,
    headers: &HeaderMap,
    query: Option<&str>,
) -> HttpResult<Response<RespBody>> {
    let authenticated = extract_credential(headers, query).is_some();
    let body = json!({
        "status": "active",
        "version": API_VERSION,
        "timestamp": Utc::now(),
        "authenticated": authenticated,
        "endpoints": {
            "insights": INSIGHTS,
            "quotes": QUOTES,
            "forecast": FORECAST,
            "admin": ADMIN_KEYS,
        },
        "rateLimit": {
            "requestsPerMinute": state.limits.insights,
            "requestsPerHour": REQUESTS_PER_HOUR,
        },
        "authentication": {
            "required": true,
            "methods": [
                format!("header: {API_KEY_HEADER}"),
                format!("query: {API_KEY_QUERY_PARAM}"),
            ],
        },
    });
    Ok(json_response(StatusCode::OK, &body)?)
}

/// `GET /api/insights`
pub fn insights(
    state: &AppState,
    headers: &HeaderMap,
    query: Option<&str>,
) -> HttpResult<Response<RespBody>> {
    let admission =
        check_access(state, headers, query, INSIGHTS, Access::Authenticated, |_| {
            state.limits.insights
        })?;

    let insight = random_insight()
        .ok_or_else(|| HttpError::Internal("Failed to generate insight".into()))?;

    gated_json(
        StatusCode::OK,
        &json!({
            "insight": insight,
            "timestamp": Utc::now(),
            "keyType": admission.role.as_str(),
        }),
        &admission,
    )
}

/// `GET /api/quotes`
///
/// Tries the configured upstream first; `source` reports `api` or `fallback`.
pub async fn quotes(
    state: &AppState,
    headers: &HeaderMap,
    query: Option<&str>,
) -> HttpResult<Response<RespBody>> {
    let admission = check_access(state, headers, query, QUOTES, Access::Authenticated, |_| {
        state.limits.quotes
    })?;

    let upstream = match &state.quote_source {
        Some(source) => source.fetch().await,
        None => None,
    };
    let (quote, source) = match upstream {
        Some(quote) => (quote, "api"),
        None => {
            let quote = fallback_quote()
                .ok_or_else(|| HttpError::Internal("Failed to generate quote".into()))?;
            (quote.to_string(), "fallback")
        }
    };

    gated_json(
        StatusCode::OK,
        &json!({
            "quote": quote,
            "source": source,
            "timestamp": Utc::now(),
            "keyType": admission.role.as_str(),
        }),
        &admission,
    )
}

/// `GET /api/forecast` - ungated description of the POST contract
pub fn forecast_docs(state: &AppState) -> HttpResult<Response<RespBody>> {
    let body = json!({
        "endpoint": FORECAST,
        "method": "POST",
        "description": "Generate career forecast based on job title and LinkedIn profile",
        "authentication": "Required (API key)",
        "rateLimit": {
            "user": format!("{} requests/minute", state.limits.forecast_user),
            "admin": format!("{} requests/minute", state.limits.forecast_admin),
        },
        "requestBody": {
            "jobTitle": "string (required) - Current job title",
            "linkedInUrl": "string (required) - LinkedIn profile URL",
        },
        "responseFormat": {
            "powerScore": "number (0-100) - Career potential score",
            "futureRoles": "array - Predicted career progression",
            "industries": "array - Relevant industry opportunities",
            "blurb": "string - Personalized career analysis summary",
            "analysisDate": "string - ISO timestamp of analysis",
        },
        "example": {
            "request": {
                "jobTitle": "Software Engineer",
                "linkedInUrl": "https://linkedin.com/in/johndoe",
            },
        },
    });
    Ok(json_response(StatusCode::OK, &body)?)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ForecastMetadata<'a> {
    job_title: &'a str,
    linked_in_url: &'a str,
    key_type: &'static str,
    timestamp: chrono::DateTime<Utc>,
}

/// `POST /api/forecast`
pub async fn forecast<B>(
    state: &AppState,
    headers: &HeaderMap,
    query: Option<&str>,
    body: B,
) -> HttpResult<Response<RespBody>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let admission = check_access(state, headers, query, FORECAST, Access::Authenticated, |role| {
        state.forecast_limit(role)
    })?;

    let payload = read_json(body, state.timeouts.max_body_bytes).await?;

    let job_title = payload
        .get("jobTitle")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            HttpError::BadRequest("Job title is required and must be a non-empty string".into())
        })?;
    let linkedin_url = payload
        .get("linkedInUrl")
        .and_then(Value::as_str)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| {
            HttpError::BadRequest("LinkedIn URL is required and must be a string".into())
        })?;
    if !linkedin_url.contains("linkedin.com") {
        return Err(HttpError::BadRequest("Invalid LinkedIn URL format".into()));
    }
    let linkedin_url = linkedin_url.trim();

    let forecast = Forecast::generate(job_title, linkedin_url);
    let metadata = ForecastMetadata {
        job_title,
        linked_in_url: linkedin_url,
        key_type: admission.role.as_str(),
        timestamp: Utc::now(),
    };

    gated_json(
        StatusCode::OK,
        &json!({
            "success": true,
            "data": forecast,
            "metadata": metadata,
        }),
        &admission,
    )
}

/// `GET /api/admin/keys` - sanitized key listing
pub fn list_keys(
    state: &AppState,
    headers: &HeaderMap,
    query: Option<&str>,
) -> HttpResult<Response<RespBody>> {
    let admission =
        check_access(state, headers, query, ADMIN_KEYS, Access::AdminOnly, |_| state.limits.admin)?;

    let keys = state.registry.list();
    gated_json(
        StatusCode::OK,
        &json!({
            "total": keys.len(),
            "keys": keys,
            "timestamp": Utc::now(),
        }),
        &admission,
    )
}

/// `POST /api/admin/keys` - issue a new key
///
/// Issued keys show up in the listing but are not accepted by the key
/// validator, which only knows the configured secrets.
pub async fn issue_key<B>(
    state: &AppState,
    headers: &HeaderMap,
    query: Option<&str>,
    body: B,
) -> HttpResult<Response<RespBody>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let admission =
        check_access(state, headers, query, ADMIN_KEYS, Access::AdminOnly, |_| state.limits.admin)?;

    let payload = read_json(body, state.timeouts.max_body_bytes).await?;
    let role = match payload.get("type") {
        None => Role::User,
        Some(Value::String(t)) if t == "user" => Role::User,
        Some(Value::String(t)) if t == "admin" => Role::Admin,
        Some(_) => {
            return Err(HttpError::BadRequest(
                "Invalid key type. Must be \"user\" or \"admin\"".into(),
            ))
        }
    };

    let issued = state.registry.issue(role);
    info!(role = %issued.role, key_id = issued.key_id(), "API key issued");
    if let Some(m) = &state.metrics {
        m.record_key_issued(role.as_str());
    }

    gated_json(
        StatusCode::CREATED,
        &json!({
            "message": "API key created successfully",
            "keyId": issued.key_id(),
            "key": issued.key,
            "type": issued.role.as_str(),
            "created": issued.created,
        }),
        &admission,
    )
}

fn gated_json(
    status_code: StatusCode,
    body: &Value,
    admission: &Admission,
) -> HttpResult<Response<RespBody>> {
    let mut resp = json_response(status_code, body)?;
    apply_rate_limit_headers(resp.headers_mut(), &admission.outcome);
    Ok(resp)
}

/// Read a size-limited body and parse it as JSON. An empty body reads as `{}`.
async fn read_json<B>(body: B, max_bytes: usize) -> HttpResult<Value>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let bytes = Limited::new(body, max_bytes)
        .collect()
        .await
        .map_err(|e| {
            if e.downcast_ref::<LengthLimitError>().is_some() {
                HttpError::PayloadTooLarge
            } else {
                warn!(error = %e, "failed to read request body");
                HttpError::BadRequest("Failed to read request body".into())
            }
        })?
        .to_bytes();

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }

    serde_json::from_slice(&bytes)
        .map_err(|_| HttpError::BadRequest("Invalid JSON in request body".into()))
}
