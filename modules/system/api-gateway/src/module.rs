//! API gateway: owns the HTTP server and the middleware stack around module routes.

use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::StatusCode;
use axum::{Router, middleware::from_fn, routing::get};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

use crate::config::ApiGatewayConfig;
use crate::middleware;
use crate::web;

/// HTTP host for the module routes.
#[derive(Debug, Clone)]
pub struct ApiGateway {
    config: ApiGatewayConfig,
}

impl ApiGateway {
    /// Create a gateway from validated configuration.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    pub fn new(config: ApiGatewayConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    fn apply_trace_layer(router: Router) -> Router {
        use tower_http::trace::TraceLayer;
        use tracing::field::Empty;

        router.layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<axum::body::Body>| {
                    let rid = req
                        .headers()
                        .get(middleware::request_id::header())
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("n/a");

                    tracing::info_span!(
                        "http_request",
                        method = %req.method(),
                        uri = %req.uri().path(),
                        version = ?req.version(),
                        request_id = %rid,
                        status = Empty,
                        latency_ms = Empty,
                    )
                })
                .on_response(
                    |res: &axum::http::Response<axum::body::Body>,
                     latency: Duration,
                     span: &tracing::Span| {
                        span.record("status", res.status().as_u16());
                        span.record("latency_ms", latency.as_millis());
                    },
                ),
        )
    }

    /// Wrap `router` in the gateway middleware.
    ///
    /// Runtime order, outermost first:
    /// `SetRequestId` -> `PropagateRequestId` -> Trace -> `push_req_id_to_extensions`
    /// -> Timeout -> CORS (if enabled) -> router.
    #[must_use]
    pub fn apply_middleware_stack(&self, mut router: Router) -> Router {
        // Layers are registered innermost first.
        if self.config.cors_enabled {
            router = router.layer(crate::cors::build_cors_layer(&self.config));
        }

        router = router.layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            Duration::from_secs(self.config.request_timeout_secs),
        ));

        router = router.layer(from_fn(middleware::request_id::push_req_id_to_extensions));

        router = Self::apply_trace_layer(router);

        let x_request_id = middleware::request_id::header();
        router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
        router.layer(SetRequestIdLayer::new(
            x_request_id,
            middleware::request_id::MakeReqId,
        ))
    }

    /// Mount module routes under the base path, add the health routes at the
    /// root and apply the middleware stack.
    #[must_use]
    pub fn finalize(&self, routes: Router) -> Router {
        let base = self.config.base_path.as_str();
        let mounted = if base.is_empty() {
            routes
        } else {
            Router::new().nest(base, routes)
        };

        let router = Router::new()
            .route("/health", get(web::health_check))
            .route("/healthz", get(web::healthz))
            .merge(mounted);

        tracing::debug!(base_path = base, "REST host finalized router");
        self.apply_middleware_stack(router)
    }

    /// Bind the configured address and serve until `cancel` fires.
    ///
    /// # Errors
    /// Returns an error if the address cannot be bound or the server fails.
    pub async fn serve(&self, router: Router, cancel: CancellationToken) -> Result<()> {
        let addr = self.config.socket_addr()?;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        Self::serve_on(listener, router, cancel).await
    }

    /// Serve on an already bound listener until `cancel` fires.
    ///
    /// # Errors
    /// Returns an error if the server fails.
    pub async fn serve_on(
        listener: TcpListener,
        router: Router,
        cancel: CancellationToken,
    ) -> Result<()> {
        if let Ok(addr) = listener.local_addr() {
            tracing::info!("HTTP server bound on {addr}");
        }

        let shutdown = async move {
            cancel.cancelled().await;
            tracing::info!("HTTP server shutting down gracefully (cancellation)");
        };

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| anyhow::anyhow!(e))
    }
}
