use crate::error::Result;
use crate::gateway::response::{text_response, RespBody};
use crate::telemetry::{
    handle_metrics, health_check_response, live_check_response, ready_check_response,
};
use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use prometheus::Registry;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Start the observability server that handles metrics and health checks
/// This server runs on a dedicated port and serves:
/// - `/metrics` - Prometheus metrics
/// - `/health` - Health check endpoint
/// - `/ready` - Readiness check endpoint
/// - `/live` - Liveness check endpoint
pub async fn start_observability_server(
    port: u16,
    registry: Registry,
    accepting: Arc<AtomicBool>,
    shutdown: CancellationToken,
) -> Result<()> {
    let registry = Arc::new(registry);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;

    info!(?addr, "Observability server started (metrics + health checks)");

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("Observability server: shutdown requested");
                break;
            }
            result = listener.accept() => {
                let (stream, peer) = match result {
                    Ok((stream, peer)) => (stream, peer),
                    Err(e) => {
                        warn!(error = %e, "Observability server: accept error");
                        continue;
                    }
                };

                let registry = registry.clone();
                let accepting = accepting.clone();
                tokio::spawn(async move {
                    let svc = hyper::service::service_fn(move |req: Request<Incoming>| {
                        let registry = registry.clone();
                        let accepting = accepting.clone();
                        async move {
                            let resp = match req.uri().path() {
                                "/health" => or_internal_error(health_check_response()),
                                "/ready" => or_internal_error(ready_check_response(
                                    accepting.load(Ordering::Relaxed),
                                )),
                                "/live" => or_internal_error(live_check_response()),
                                "/metrics" => or_internal_error(handle_metrics(&registry)),
                                _ => text_response(StatusCode::NOT_FOUND, "Not Found"),
                            };
                            Ok::<_, hyper::Error>(resp)
                        }
                    });

                    let builder = ConnBuilder::new(TokioExecutor::new());
                    if let Err(e) = builder.serve_connection(TokioIo::new(stream), svc).await {
                        warn!(?peer, error = %e, "Observability server: serve_connection error");
                    }
                });
            }
        }
    }

    info!("Observability server stopped");
    Ok(())
}

fn or_internal_error(result: Result<Response<RespBody>>) -> Response<RespBody> {
    result.unwrap_or_else(|e| {
        warn!(error = %e, "Observability server: failed to build response");
        text_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    })
}
