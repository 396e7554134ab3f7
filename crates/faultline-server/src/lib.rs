#![allow(clippy::must_use_candidate)]

mod error;
mod fallback;
mod health;
mod probe;
mod responder;

use std::net::SocketAddr;

use axum::Router;
use faultline_config::{Config, ServerConfig};
use faultline_core::ErrorResponder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use responder::{error_responder_middleware, panic_response};

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    pub fn new(config: &Config) -> Self {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        Self {
            router: router(&config.server),
            listen_address,
        }
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}

/// Build the router for a server configuration
pub fn router(config: &ServerConfig) -> Router {
    let responder = ErrorResponder::new(config.environment);
    tracing::debug!(
        environment = %config.environment,
        diagnostics = config.environment.is_development(),
        "building router"
    );

    let mut app = Router::new();

    // Health check
    if config.health.enabled {
        app = app.route(&config.health.path, axum::routing::get(health::health_handler));
    }

    // Error probe
    if config.error_probe.enabled {
        app = app.merge(probe::probe_router(&config.error_probe.path));
    }

    // Anything unmatched is rejected
    app = app.fallback(fallback::unmatched_route_handler);

    // Apply middleware layers (innermost first)

    // Panics become 500s carrying the panic message as context
    app = app.layer(CatchPanicLayer::custom(responder::panic_response));

    // Body size limit
    app = app.layer(RequestBodyLimitLayer::new(config.request_body_limit));

    // Error rendering, sees everything produced above
    app = app.layer(axum::middleware::from_fn(move |req, next| {
        error_responder_middleware(responder, req, next)
    }));

    // Tracing
    app.layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use faultline_config::{ErrorProbeConfig, HealthConfig};
    use faultline_core::Environment;
    use http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    fn config(environment: Environment) -> ServerConfig {
        ServerConfig {
            environment,
            request_body_limit: 16,
            error_probe: ErrorProbeConfig {
                enabled: true,
                ..ErrorProbeConfig::default()
            },
            ..ServerConfig::default()
        }
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn health_is_plain_ok() {
        let response = router(&config(Environment::Production))
            .oneshot(get("/health"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn disabled_health_falls_through_to_rejection() {
        let config = ServerConfig {
            health: HealthConfig {
                enabled: false,
                ..HealthConfig::default()
            },
            ..config(Environment::Production)
        };

        let (status, body) = send(router(&config), get("/health")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["type"], "FORBIDDEN");
    }

    #[tokio::test]
    async fn unmatched_route_in_production_hides_path() {
        let (status, body) = send(router(&config(Environment::Production)), get("//foo//bar")).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            body,
            json!({
                "success": false,
                "status": 403,
                "type": "FORBIDDEN",
                "message": "You do not have permission to access this resource"
            })
        );
    }

    #[tokio::test]
    async fn unmatched_route_in_development_shows_normalized_path() {
        let (status, body) = send(router(&config(Environment::Development)), get("//foo//bar")).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["stack"]["context"]["path"], "/foo/bar");
    }

    #[tokio::test]
    async fn wrong_method_is_rendered() {
        let request = Request::builder()
            .method("DELETE")
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(router(&config(Environment::Production)), request).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["type"], "METHOD NOT ALLOWED");
    }

    #[tokio::test]
    async fn oversized_body_is_rendered() {
        let request = Request::builder()
            .method("POST")
            .uri("/health")
            .header(header::CONTENT_LENGTH, "64")
            .body(Body::from(vec![b'x'; 64]))
            .unwrap();

        let (status, body) = send(router(&config(Environment::Production)), request).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["type"], "PAYLOAD TOO LARGE");
    }

    #[tokio::test]
    async fn probe_raises_named_kind() {
        let (status, body) = send(router(&config(Environment::Production)), get("/errors/TOO_MANY_REQUESTS")).await;

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["type"], "TOO MANY REQUESTS");
        assert_eq!(body["message"], "Too many requests, please try again later");
    }

    #[tokio::test]
    async fn probe_uses_query_message() {
        let (status, body) = send(
            router(&config(Environment::Production)),
            get("/errors/CONFLICT?message=already%20exists"),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "already exists");
    }

    #[tokio::test]
    async fn probe_unknown_kind_is_500_with_its_name() {
        let (status, body) = send(router(&config(Environment::Production)), get("/errors/NOT_A_KIND")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["type"], "NOT A KIND");
        assert_eq!(body["message"], "Something went wrong");
    }

    #[tokio::test]
    async fn non_error_kinds_are_refused_with_json() {
        for kind in ["CONTINUE", "OK", "NO_CONTENT", "NOT_MODIFIED"] {
            let (status, body) = send(router(&config(Environment::Development)), get(&format!("/errors/{kind}"))).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{kind}");
            assert_eq!(body["success"], false, "{kind}");
            assert_eq!(body["type"], "BAD REQUEST", "{kind}");
            assert_eq!(body["stack"]["context"]["kind"], kind, "{kind}");
        }
    }

    async fn boom() -> &'static str {
        panic!("kaboom")
    }

    #[tokio::test]
    async fn panicking_handler_is_rendered() {
        let app = Router::new()
            .route("/boom", axum::routing::get(boom))
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(axum::middleware::from_fn(|req, next| {
                error_responder_middleware(ErrorResponder::new(Environment::Development), req, next)
            }));

        let (status, body) = send(app, get("/boom")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["stack"]["context"]["panic"], "kaboom");
    }
}
