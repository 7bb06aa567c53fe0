use std::sync::atomic::Ordering;
use std::sync::Arc;

use hyper::body::Incoming;
use hyper::Request;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::connection::ConnectionTracker;
use super::handler::handle_api_request;
use super::AppState;
use crate::config::Config;
use crate::error::{GateError, Result};
use crate::telemetry::{init_metrics, start_observability_server};

/// Bind the configured listener and serve the API until SIGTERM or SIGINT.
///
/// Starts the observability server first when `telemetry.metrics_port` is set.
pub async fn run(config: Arc<Config>) -> Result<()> {
    let shutdown = CancellationToken::new();

    if config.auth.secrets_collide() {
        warn!("admin and user secrets are identical; every credential resolves to the admin role");
    }

    let metrics = match config.telemetry.metrics_port {
        Some(port) => {
            let (metrics, registry) = init_metrics()
                .map_err(|e| GateError::Config(format!("Failed to initialize metrics: {e}")))?;
            Some((port, metrics, registry))
        }
        None => None,
    };

    let state = Arc::new(AppState::from_config(
        &config,
        metrics.as_ref().map(|(_, m, _)| m.clone()),
    )?);
    if let Some(source) = &state.quote_source {
        info!(url = source.url(), "quotes fetched upstream with local fallback");
    }

    let observability = metrics.map(|(port, _, registry)| {
        let accepting = state.accepting.clone();
        let token = shutdown.clone();
        tokio::spawn(async move {
            if let Err(e) = start_observability_server(port, registry, accepting, token).await {
                warn!(error = %e, "Observability server exited with error");
            }
        })
    });

    spawn_signal_listener(shutdown.clone())?;

    let listener = TcpListener::bind(config.listen).await?;
    let result = serve(listener, state, shutdown.clone()).await;

    shutdown.cancel();
    if let Some(handle) = observability {
        if let Err(e) = handle.await {
            warn!(error = %e, "Observability server task failed");
        }
    }

    result
}

/// Serve the API on an already-bound listener until `shutdown` is cancelled.
///
/// Open connections are asked to finish gracefully; the call returns once they
/// have closed or `timeout.shutdown_secs` has passed.
pub async fn serve(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: CancellationToken,
) -> Result<()> {
    let addr = listener.local_addr()?;
    let builder = ConnBuilder::new(TokioExecutor::new());
    let (tracker, mut closed_rx) = ConnectionTracker::new();
    let connection_timeout = Duration::from_secs(state.timeouts.connection_handling_secs);

    state.accepting.store(true, Ordering::Relaxed);
    info!(?addr, "career spark API listening");

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("Shutdown requested, no longer accepting connections");
                break;
            }
            result = listener.accept() => {
                let (stream, peer) = match result {
                    Ok((stream, peer)) => (stream, peer),
                    Err(e) => {
                        warn!(error = %e, "accept error");
                        continue;
                    }
                };

                let guard = tracker.track(state.metrics.as_ref());
                let builder = builder.clone();
                let state = state.clone();
                let shutdown = shutdown.clone();

                tokio::spawn(async move {
                    let _guard = guard;
                    let svc = hyper::service::service_fn(move |req: Request<Incoming>| {
                        let state = state.clone();
                        async move { Ok::<_, hyper::Error>(handle_api_request(req, &state).await) }
                    });

                    let serve_fut = async {
                        let conn = builder.serve_connection(TokioIo::new(stream), svc);
                        tokio::pin!(conn);
                        tokio::select! {
                            res = conn.as_mut() => res,
                            _ = shutdown.cancelled() => {
                                conn.as_mut().graceful_shutdown();
                                conn.await
                            }
                        }
                    };

                    match tokio::time::timeout(connection_timeout, serve_fut).await {
                        Ok(Ok(())) => {}
                        Ok(Err(e)) => warn!(?peer, error = %e, "serve_connection error"),
                        Err(_) => warn!(?peer, "connection handling timeout"),
                    }
                });
            }
        }
    }

    state.accepting.store(false, Ordering::Relaxed);
    drop(listener);

    let shutdown_secs = state.timeouts.shutdown_secs;
    info!("Waiting for active connections to finish (timeout: {shutdown_secs}s)");

    let drained = tokio::time::timeout(Duration::from_secs(shutdown_secs), async {
        while tracker.active() > 0 {
            if closed_rx.changed().await.is_err() {
                break;
            }
        }
    })
    .await;

    match drained {
        Ok(()) => info!("All connections closed, shutdown complete"),
        Err(_) => warn!(
            active_connections = tracker.active(),
            "Shutdown timeout reached with connections still active"
        ),
    }

    Ok(())
}

fn spawn_signal_listener(shutdown: CancellationToken) -> Result<()> {
    let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate()).map_err(|e| {
        GateError::Io(std::io::Error::other(format!("Failed to setup SIGTERM handler: {e}")))
    })?;
    let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt()).map_err(|e| {
        GateError::Io(std::io::Error::other(format!("Failed to setup SIGINT handler: {e}")))
    })?;

    tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => info!("Received SIGTERM, initiating graceful shutdown"),
            _ = sigint.recv() => info!("Received SIGINT, initiating graceful shutdown"),
            _ = shutdown.cancelled() => return,
        }
        shutdown.cancel();
    });

    Ok(())
}
