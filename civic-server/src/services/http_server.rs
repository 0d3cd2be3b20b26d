use crate::core::{Config, ServerState};
use crate::utils::{AppError, AppResult};
use axum::extract::DefaultBodyLimit;
use axum::{Router, middleware};
use std::net::SocketAddr;
use std::time::Duration;
use tower::ServiceExt;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

/// Grace period for in-flight requests on shutdown
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(crate::api::health::router())
        .merge(crate::api::issues::router())
        .merge(crate::api::predict::router())
        .merge(crate::api::uploads::router())
}

#[derive(Clone, Debug)]
pub struct HttpService {
    config: Config,
    router: Router,
}

impl HttpService {
    /// Bind the router to a fully initialized state
    pub fn new(config: Config, state: ServerState) -> Self {
        let router = build_app()
            .with_state(state)
            // 上传请求体上限，超出时 multipart 读取返回 413
            .layer(DefaultBodyLimit::max(config.max_upload_bytes))
            // Tower HTTP 中间件
            .layer(CorsLayer::permissive())
            .layer(CompressionLayer::new())
            // HTTP 请求日志中间件
            .layer(middleware::from_fn(log_request));

        Self { config, router }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Dispatch one request without a socket
    pub async fn oneshot(
        &self,
        request: http::Request<axum::body::Body>,
    ) -> http::Response<axum::body::Body> {
        match self.router.clone().oneshot(request).await {
            Ok(response) => response,
            // Router 的 Service::Error 为 Infallible
            Err(never) => match never {},
        }
    }

    /// Serve until `shutdown_signal` resolves, then drain in-flight requests
    pub async fn start_server<F>(&self, shutdown_signal: F) -> AppResult<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("🚀 Starting HTTP server on {}", addr);

        let handle = axum_server::Handle::new();

        // Handle shutdown signal
        let handle_clone = handle.clone();
        tokio::spawn(async move {
            shutdown_signal.await;
            handle_clone.graceful_shutdown(Some(SHUTDOWN_GRACE));
        });

        axum_server::bind(addr)
            .handle(handle)
            .serve(self.router().into_make_service())
            .await
            .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

        Ok(())
    }
}
