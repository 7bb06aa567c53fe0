use career_spark_lib::content::MOTIVATIONAL_QUOTES;
use http::StatusCode;

use super::helpers::{
    header, pick_free_port, request, send, spawn_quote_upstream, test_state, TestResult,
    ADMIN_KEY, USER_KEY,
};

fn is_fallback_quote(body: &serde_json::Value) -> bool {
    body["quote"].as_str().is_some_and(|q| MOTIVATIONAL_QUOTES.contains(&q))
}

#[tokio::test]
async fn test_status_is_ungated() -> TestResult {
    let state = test_state("")?;

    let (resp, body) = send(&state, request("GET", "/api/status", None, "")?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body["status"], "active");
    assert_eq!(body["authenticated"], false);
    assert_eq!(body["rateLimit"]["requestsPerMinute"], 60);
    assert!(header(&resp, "x-ratelimit-limit").is_none());

    let (_, body) = send(&state, request("GET", "/api/status", Some("anything"), "")?).await?;
    assert_eq!(body["authenticated"], true);
    Ok(())
}

#[tokio::test]
async fn test_missing_key_is_unauthorized() -> TestResult {
    let state = test_state("")?;

    let (resp, body) = send(&state, request("GET", "/api/insights", None, "")?).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or missing API key");
    assert_eq!(body["status"], 401);
    assert!(body["timestamp"].is_string());
    assert!(header(&resp, "x-ratelimit-remaining").is_none());
    Ok(())
}

#[tokio::test]
async fn test_wrong_key_is_unauthorized() -> TestResult {
    let state = test_state("")?;

    let (resp, _) =
        send(&state, request("GET", "/api/quotes", Some("user-secret-USER0002"), "")?).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(state.limiter.tracked_keys(), 0);
    Ok(())
}

#[tokio::test]
async fn test_insights_with_user_key() -> TestResult {
    let state = test_state("")?;

    let (resp, body) = send(&state, request("GET", "/api/insights", Some(USER_KEY), "")?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body["keyType"], "user");
    assert!(body["insight"].as_str().is_some_and(|s| !s.is_empty()));
    assert_eq!(header(&resp, "x-ratelimit-limit"), Some("60"));
    assert_eq!(header(&resp, "x-ratelimit-remaining"), Some("59"));
    assert!(header(&resp, "x-ratelimit-reset").is_some());
    assert_eq!(state.limiter.count("user:USER0001"), Some(1));
    Ok(())
}

#[tokio::test]
async fn test_quotes_accepts_query_parameter() -> TestResult {
    let state = test_state("")?;

    let uri = format!("/api/quotes?api_key={ADMIN_KEY}");
    let (resp, body) = send(&state, request("GET", &uri, None, "")?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body["keyType"], "admin");
    assert_eq!(body["source"], "fallback");
    assert!(is_fallback_quote(&body));
    Ok(())
}

#[tokio::test]
async fn test_percent_encoded_query_key_is_decoded() -> TestResult {
    let state = test_state("")?;

    let (resp, body) =
        send(&state, request("GET", "/api/insights?api%5Fkey=user%2Dsecret%2DUSER0001", None, "")?)
            .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body["keyType"], "user");
    Ok(())
}

#[tokio::test]
async fn test_quotes_from_upstream() -> TestResult {
    let upstream = spawn_quote_upstream(
        "200 OK",
        r#"{"_id":"q1","content":"Stay hungry, stay foolish.","author":"Stewart Brand"}"#,
    )
    .await?;
    let state = test_state(&format!("[quotes]\nupstream_url = \"http://{upstream}/random\"\n"))?;

    let (resp, body) = send(&state, request("GET", "/api/quotes", Some(USER_KEY), "")?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body["source"], "api");
    assert_eq!(body["quote"], "\"Stay hungry, stay foolish.\" - Stewart Brand");
    assert_eq!(body["keyType"], "user");
    assert_eq!(header(&resp, "x-ratelimit-remaining"), Some("59"));
    Ok(())
}

#[tokio::test]
async fn test_quotes_fall_back_when_upstream_unreachable() -> TestResult {
    let dead = pick_free_port()?;
    let state = test_state(&format!(
        "[quotes]\nupstream_url = \"http://{dead}/random\"\nupstream_timeout_ms = 500\n"
    ))?;

    let (resp, body) = send(&state, request("GET", "/api/quotes", Some(USER_KEY), "")?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body["source"], "fallback");
    assert!(is_fallback_quote(&body));
    assert_eq!(header(&resp, "x-ratelimit-limit"), Some("60"));
    Ok(())
}

#[tokio::test]
async fn test_quotes_fall_back_on_upstream_error_status() -> TestResult {
    let upstream =
        spawn_quote_upstream("503 Service Unavailable", r#"{"error":"overloaded"}"#).await?;
    let state = test_state(&format!("[quotes]\nupstream_url = \"http://{upstream}/random\"\n"))?;

    let (resp, body) = send(&state, request("GET", "/api/quotes", Some(USER_KEY), "")?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body["source"], "fallback");
    assert!(is_fallback_quote(&body));
    Ok(())
}

#[tokio::test]
async fn test_quotes_fall_back_on_unexpected_upstream_body() -> TestResult {
    let upstream = spawn_quote_upstream("200 OK", r#"{"text":"no content field"}"#).await?;
    let state = test_state(&format!("[quotes]\nupstream_url = \"http://{upstream}/random\"\n"))?;

    let (_, body) = send(&state, request("GET", "/api/quotes", Some(USER_KEY), "")?).await?;
    assert_eq!(body["source"], "fallback");
    assert!(is_fallback_quote(&body));
    Ok(())
}

#[tokio::test]
async fn test_rejected_quote_request_skips_upstream() -> TestResult {
    let dead = pick_free_port()?;
    let state = test_state(&format!("[quotes]\nupstream_url = \"http://{dead}/random\"\n"))?;

    let (resp, body) = send(&state, request("GET", "/api/quotes", None, "")?).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or missing API key");
    Ok(())
}

#[tokio::test]
async fn test_exhausted_window_returns_429() -> TestResult {
    let state = test_state("[rate_limit]\ninsights = 2\n")?;

    for expected in ["1", "0"] {
        let (resp, _) =
            send(&state, request("GET", "/api/insights", Some(USER_KEY), "")?).await?;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(header(&resp, "x-ratelimit-remaining"), Some(expected));
    }

    let (resp, body) = send(&state, request("GET", "/api/insights", Some(USER_KEY), "")?).await?;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body, serde_json::json!({ "error": "Rate limit exceeded" }));
    assert_eq!(header(&resp, "x-ratelimit-limit"), Some("2"));
    assert_eq!(header(&resp, "x-ratelimit-remaining"), Some("0"));
    assert!(header(&resp, "x-ratelimit-reset").is_some());

    // other credentials keep their own window
    let (resp, _) = send(&state, request("GET", "/api/insights", Some(ADMIN_KEY), "")?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_insights_and_quotes_share_one_window() -> TestResult {
    let state = test_state("[rate_limit]\ninsights = 2\nquotes = 2\n")?;

    for _ in 0..2 {
        let (resp, _) =
            send(&state, request("GET", "/api/insights", Some(USER_KEY), "")?).await?;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    // each route checks its own limit against the credential's shared count
    let (resp, body) = send(&state, request("GET", "/api/quotes", Some(USER_KEY), "")?).await?;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body, serde_json::json!({ "error": "Rate limit exceeded" }));
    assert_eq!(header(&resp, "x-ratelimit-limit"), Some("2"));
    assert_eq!(header(&resp, "x-ratelimit-remaining"), Some("0"));
    assert_eq!(state.limiter.count("user:USER0001"), Some(2));
    Ok(())
}

#[tokio::test]
async fn test_quotes_draw_down_the_insights_window() -> TestResult {
    let state = test_state("[rate_limit]\ninsights = 3\nquotes = 3\n")?;

    let (resp, _) = send(&state, request("GET", "/api/quotes", Some(USER_KEY), "")?).await?;
    assert_eq!(header(&resp, "x-ratelimit-remaining"), Some("2"));
    let (resp, _) = send(&state, request("GET", "/api/insights", Some(USER_KEY), "")?).await?;
    assert_eq!(header(&resp, "x-ratelimit-remaining"), Some("1"));
    let (resp, _) = send(&state, request("GET", "/api/quotes", Some(USER_KEY), "")?).await?;
    assert_eq!(header(&resp, "x-ratelimit-remaining"), Some("0"));

    let (resp, _) = send(&state, request("GET", "/api/insights", Some(USER_KEY), "")?).await?;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    Ok(())
}

#[tokio::test]
async fn test_forecast_limit_depends_on_role() -> TestResult {
    let state = test_state("")?;
    let body = r#"{"jobTitle": "Software Engineer", "linkedInUrl": "https://linkedin.com/in/jane"}"#;

    let (resp, _) = send(&state, request("POST", "/api/forecast", Some(USER_KEY), body)?).await?;
    assert_eq!(header(&resp, "x-ratelimit-limit"), Some("20"));

    let (resp, _) = send(&state, request("POST", "/api/forecast", Some(ADMIN_KEY), body)?).await?;
    assert_eq!(header(&resp, "x-ratelimit-limit"), Some("50"));
    Ok(())
}

#[tokio::test]
async fn test_forecast_success() -> TestResult {
    let state = test_state("")?;
    let body =
        r#"{"jobTitle": "  Senior Software Engineer ", "linkedInUrl": "https://linkedin.com/in/jane"}"#;

    let (resp, json) =
        send(&state, request("POST", "/api/forecast", Some(USER_KEY), body)?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["powerScore"], 86);
    assert_eq!(json["data"]["futureRoles"][0]["role"], "Senior Software Engineer");
    assert_eq!(json["metadata"]["jobTitle"], "Senior Software Engineer");
    assert_eq!(json["metadata"]["linkedInUrl"], "https://linkedin.com/in/jane");
    assert_eq!(json["metadata"]["keyType"], "user");
    Ok(())
}

#[tokio::test]
async fn test_forecast_validation_errors() -> TestResult {
    let state = test_state("")?;
    let url = "https://linkedin.com/in/x";
    let title_error = "Job title is required and must be a non-empty string";
    let cases = [
        ("{not json".to_string(), "Invalid JSON in request body"),
        (format!(r#"{{"linkedInUrl": "{url}"}}"#), title_error),
        (format!(r#"{{"jobTitle": "   ", "linkedInUrl": "{url}"}}"#), title_error),
        (format!(r#"{{"jobTitle": 42, "linkedInUrl": "{url}"}}"#), title_error),
        (r#"{"jobTitle": "Chef"}"#.to_string(), "LinkedIn URL is required and must be a string"),
        (
            r#"{"jobTitle": "Chef", "linkedInUrl": "https://example.com/me"}"#.to_string(),
            "Invalid LinkedIn URL format",
        ),
    ];

    for (body, message) in cases {
        let (resp, json) =
            send(&state, request("POST", "/api/forecast", Some(USER_KEY), &body)?).await?;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(json["error"], message, "body: {body}");
        assert_eq!(json["status"], 400);
    }
    Ok(())
}

#[tokio::test]
async fn test_forecast_docs_are_ungated() -> TestResult {
    let state = test_state("[rate_limit]\nforecast_user = 5\n")?;

    let (resp, body) = send(&state, request("GET", "/api/forecast", None, "")?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body["method"], "POST");
    assert_eq!(body["rateLimit"]["user"], "5 requests/minute");
    Ok(())
}

#[tokio::test]
async fn test_oversized_body_is_rejected() -> TestResult {
    let state = test_state("[timeout]\nmax_body_bytes = 16\n")?;
    let body = r#"{"jobTitle": "Software Engineer", "linkedInUrl": "https://linkedin.com/in/jane"}"#;

    let (resp, json) =
        send(&state, request("POST", "/api/forecast", Some(USER_KEY), body)?).await?;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json["status"], 413);
    Ok(())
}

#[tokio::test]
async fn test_admin_routes_reject_user_key() -> TestResult {
    let state = test_state("")?;

    for key in [Some(USER_KEY), Some("bogus"), None] {
        let (resp, body) = send(&state, request("GET", "/api/admin/keys", key, "")?).await?;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Admin access required");
    }

    let (resp, _) =
        send(&state, request("POST", "/api/admin/keys", Some(USER_KEY), "{}")?).await?;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn test_admin_lists_sanitized_keys() -> TestResult {
    let state = test_state("")?;

    send(&state, request("GET", "/api/insights", Some(USER_KEY), "")?).await?;

    let (resp, body) = send(&state, request("GET", "/api/admin/keys", Some(ADMIN_KEY), "")?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header(&resp, "x-ratelimit-limit"), Some("100"));
    assert_eq!(body["total"], 2);
    assert_eq!(body["keys"][0]["keyId"], "USER0001");
    assert_eq!(body["keys"][0]["type"], "user");
    assert_eq!(body["keys"][0]["requestCount"], 1);
    assert!(body["keys"][0]["lastUsed"].is_string());
    assert_eq!(body["keys"][1]["keyId"], "ADMIN001");
    assert!(!body.to_string().contains(ADMIN_KEY));
    assert!(!body.to_string().contains(USER_KEY));
    Ok(())
}

#[tokio::test]
async fn test_admin_issues_keys() -> TestResult {
    let state = test_state("")?;

    let (resp, body) =
        send(&state, request("POST", "/api/admin/keys", Some(ADMIN_KEY), r#"{"type": "admin"}"#)?)
            .await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(body["type"], "admin");
    let key = body["key"].as_str().ok_or("key missing")?;
    assert!(key.starts_with("cs_admin_"));
    assert_eq!(body["keyId"].as_str(), key.get(key.len() - 8..));

    // issued keys are listed but not accepted by the gate
    let (resp, _) = send(&state, request("GET", "/api/insights", Some(key), "")?).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(state.registry.len(), 3);

    let (resp, body) = send(&state, request("POST", "/api/admin/keys", Some(ADMIN_KEY), "")?).await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(body["type"], "user");

    let (resp, body) =
        send(&state, request("POST", "/api/admin/keys", Some(ADMIN_KEY), r#"{"type": "root"}"#)?)
            .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid key type. Must be \"user\" or \"admin\"");
    Ok(())
}

#[tokio::test]
async fn test_unknown_path_and_method() -> TestResult {
    let state = test_state("")?;

    let (resp, body) = send(&state, request("GET", "/api/nope", Some(USER_KEY), "")?).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);

    let (resp, _) = send(&state, request("DELETE", "/api/insights", Some(USER_KEY), "")?).await?;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(state.limiter.tracked_keys(), 0);
    Ok(())
}
