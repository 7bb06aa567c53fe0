use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use career_spark_lib::serve;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use super::helpers::{test_state, TestResult, USER_KEY};

#[tokio::test]
async fn test_serves_over_tcp_and_shuts_down() -> TestResult {
    let state = Arc::new(test_state("[timeout]\nshutdown_secs = 5\n")?);
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let shutdown = CancellationToken::new();

    let server = tokio::spawn(serve(listener, state.clone(), shutdown.clone()));

    let client = reqwest::Client::new();
    let resp = client
        .get(format!("http://{addr}/api/insights"))
        .header("x-api-key", USER_KEY)
        .send()
        .await?;
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("x-ratelimit-remaining").and_then(|v| v.to_str().ok()),
        Some("59")
    );
    let body: serde_json::Value = resp.json().await?;
    assert_eq!(body["keyType"], "user");
    assert!(state.accepting.load(Ordering::Relaxed));

    let resp = client.get(format!("http://{addr}/api/insights")).send().await?;
    assert_eq!(resp.status(), 401);

    shutdown.cancel();
    tokio::time::timeout(Duration::from_secs(10), server).await???;
    assert!(!state.accepting.load(Ordering::Relaxed));
    Ok(())
}
