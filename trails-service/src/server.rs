//! HTTP server with graceful shutdown

use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

use crate::{
    config::{Config, MiddlewareConfig},
    error::Result,
    middleware::{request_id_layer, request_id_propagation_layer, sensitive_headers_layer},
};

/// Server instance
pub struct Server {
    config: Config,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Wrap `app` in the standard middleware stack.
    ///
    /// Layers are added innermost first: CORS, compression, timeout (408),
    /// body limit, tracing, header masking and request ids. Panic recovery
    /// is outermost.
    pub fn apply_middleware(&self, app: Router) -> Router {
        let body_limit = self.config.middleware.body_limit_mb * 1024 * 1024;

        app.layer(build_cors_layer(&self.config.middleware))
            .layer(CompressionLayer::new())
            .layer(TimeoutLayer::with_status_code(
                http::StatusCode::REQUEST_TIMEOUT,
                self.config.service.timeout(),
            ))
            .layer(RequestBodyLimitLayer::new(body_limit))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().include_headers(true))
                    .on_response(DefaultOnResponse::new().include_headers(true)),
            )
            .layer(sensitive_headers_layer())
            .layer(request_id_propagation_layer())
            .layer(request_id_layer())
            .layer(CatchPanicLayer::new())
    }

    /// Run the server with the given router until SIGINT or SIGTERM
    pub async fn serve(self, app: Router) -> Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.service.port));

        tracing::info!("Starting {} on {}", self.config.service.name, addr);
        self.log_middleware_config();

        let app = self.apply_middleware(app);
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    fn log_middleware_config(&self) {
        tracing::info!(
            body_limit_mb = self.config.middleware.body_limit_mb,
            cors_mode = %self.config.middleware.cors_mode,
            timeout_secs = self.config.service.timeout_secs,
            environment = %self.config.service.environment,
            "Middleware: panic recovery, request ids, header masking, compression enabled"
        );
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Build CORS layer based on configuration
fn build_cors_layer(config: &MiddlewareConfig) -> CorsLayer {
    match config.cors_mode.as_str() {
        "permissive" => {
            tracing::debug!("Enabling permissive CORS");
            CorsLayer::permissive()
        }
        "restrictive" | "disabled" => {
            tracing::debug!("Enabling restrictive CORS (default deny)");
            CorsLayer::new()
        }
        other => {
            tracing::warn!("Unknown CORS mode: {}, defaulting to permissive", other);
            CorsLayer::permissive()
        }
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl+C), starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }

    tracing::info!("Shutdown signal received, draining requests...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::post,
    };
    use tower::ServiceExt;

    #[test]
    fn test_server_creation() {
        let config = Config::default();
        let server = Server::new(config.clone());
        assert_eq!(server.config().service.port, config.service.port);
    }

    #[tokio::test]
    async fn test_body_limit_is_enforced() {
        let server = Server::new(Config::default());
        let app = server.apply_middleware(Router::new().route("/", post(|body: String| async move { body.len().to_string() })));

        let oversized = "x".repeat(2 * 1024 * 1024);
        let response = app
            .oneshot(Request::builder().method("POST").uri("/").body(Body::from(oversized)).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_request_id_added_by_stack() {
        let server = Server::new(Config::default());
        let app = server.apply_middleware(Router::new().route("/", axum::routing::get(|| async { "ok" })));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.headers().contains_key("x-request-id"));
    }

    async fn explode() -> &'static str {
        panic!("handler failure")
    }

    #[tokio::test]
    async fn test_panicking_handler_becomes_500() {
        let server = Server::new(Config::default());
        let app = server.apply_middleware(Router::new().route("/", axum::routing::get(explode)));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
