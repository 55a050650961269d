//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Wrap an application router with the render stack
//! - Wire up middleware (tracing, timeout, render settings)
//! - Bind server to listener and shut down gracefully

use std::future::Future;
use std::time::Duration;

use axum::{Extension, Router};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::AppConfig;

/// HTTP server hosting negotiated routes.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a server around `routes`.
    pub fn new(config: AppConfig, routes: Router) -> Self {
        let router = Self::build_router(&config, routes);
        Self { router, config }
    }

    /// Layer the render settings and cross-cutting middleware onto `routes`.
    #[allow(deprecated)]
    pub fn build_router(config: &AppConfig, routes: Router) -> Router {
        routes
            .layer(Extension(config.render.clone()))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run until Ctrl+C.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        self.run_until(listener, shutdown_signal()).await
    }

    /// Run until `shutdown` completes.
    pub async fn run_until<F>(
        self,
        listener: TcpListener,
        shutdown: F,
    ) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
