use std::net::SocketAddr;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::field::Empty;

use leads::LeadsModule;

use crate::config::{AppConfig, CorsConfig};

/// Wrap the module router with request tracing and, if enabled, CORS.
pub fn build_router(config: &AppConfig, module: &LeadsModule) -> Router {
    let mut router = module.router().layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &axum::http::Request<axum::body::Body>| {
                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri().path(),
                    status = Empty,
                    latency_ms = Empty,
                )
            })
            .on_response(
                |res: &axum::http::Response<axum::body::Body>,
                 latency: std::time::Duration,
                 span: &tracing::Span| {
                    span.record("status", res.status().as_u16());
                    span.record("latency_ms", latency.as_millis());
                },
            ),
    );

    if config.cors.enabled {
        router = router.layer(build_cors_layer(&config.cors));
    }
    router
}

/// Build a CORS layer from config. Wildcards map to `Any`.
#[must_use]
pub fn build_cors_layer(cfg: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new();

    if cfg.allowed_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS is configured with allowed_origins=['*']");
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cfg
            .allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();
        if !origins.is_empty() {
            layer = layer.allow_origin(origins);
        }
    }

    if cfg.allowed_methods.iter().any(|m| m == "*") {
        layer = layer.allow_methods(Any);
    } else {
        let methods: Vec<Method> = cfg
            .allowed_methods
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        if !methods.is_empty() {
            layer = layer.allow_methods(methods);
        }
    }

    if cfg.allowed_headers.iter().any(|h| h == "*") {
        layer = layer.allow_headers(Any);
    } else {
        let headers: Vec<HeaderName> = cfg
            .allowed_headers
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        if !headers.is_empty() {
            layer = layer.allow_headers(headers);
        }
    }

    if cfg.allow_credentials {
        layer = layer.allow_credentials(true);
    }
    if cfg.max_age_seconds > 0 {
        layer = layer.max_age(std::time::Duration::from_secs(cfg.max_age_seconds));
    }
    layer
}

/// Bind and serve until Ctrl+C or SIGTERM.
///
/// # Errors
/// Returns an error if the address is invalid, the socket cannot be bound
/// or the server fails.
pub async fn serve(config: &AppConfig, router: Router) -> anyhow::Result<()> {
    let bind_addr = config.bind_addr();
    let addr: SocketAddr = bind_addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address '{bind_addr}': {e}"))?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("HTTP server bound on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = wait_for_shutdown().await {
                tracing::error!(error = %e, "Signal handling failed, shutting down");
            }
        })
        .await
        .map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn wait_for_shutdown() -> anyhow::Result<()> {
    tokio::select! {
        result = signal::ctrl_c() => {
            result?;
            tracing::info!("Received Ctrl+C signal");
        }
        result = wait_sigterm() => {
            result?;
            tracing::info!("Received SIGTERM signal");
        }
    }
    tracing::info!("Shutdown signal received, initiating graceful shutdown");
    Ok(())
}

#[cfg(unix)]
async fn wait_sigterm() -> anyhow::Result<()> {
    let mut handler = signal::unix::signal(signal::unix::SignalKind::terminate())?;
    handler.recv().await;
    Ok(())
}

#[cfg(not(unix))]
async fn wait_sigterm() -> anyhow::Result<()> {
    std::future::pending::<anyhow::Result<()>>().await
}
