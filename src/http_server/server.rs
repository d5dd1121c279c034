//! # HTTP Server
//!
//! Combines the health and file routers behind a CORS layer and serves them.
//! This layer holds no logic of its own; it translates between HTTP and the
//! storage engine.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::store::FileStore;

use super::config::HttpServerConfig;
use super::files_routes::{files_routes, FilesState};

/// HTTP server for the file API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over the given store
    pub fn new<S: FileStore + 'static>(config: HttpServerConfig, state: Arc<FilesState<S>>) -> Self {
        let router = Self::build_router(&config, state);
        Self { config, router }
    }

    /// Build the combined router
    fn build_router<S: FileStore + 'static>(
        config: &HttpServerConfig,
        state: Arc<FilesState<S>>,
    ) -> Router {
        let cors = if config.cors_origins.is_empty() {
            // No origins configured: permissive, for development
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .route("/health", get(health_handler))
            .nest("/files", files_routes(state))
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("{}", e)))?;

        println!("Starting filedepot HTTP server on {}", addr);
        println!("Health check: http://{}/health", addr);
        println!("File API:     http://{}/files", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_server_builds_with_memory_store() {
        let state = Arc::new(FilesState::new(MemoryStore::new()));
        let server = HttpServer::new(HttpServerConfig::with_port(9999), state);
        assert_eq!(server.socket_addr(), "0.0.0.0:9999");
    }

    #[test]
    fn test_server_builds_with_configured_origins() {
        let config = HttpServerConfig {
            cors_origins: vec!["http://localhost:5173".to_string()],
            ..Default::default()
        };
        let state = Arc::new(FilesState::new(MemoryStore::new()));
        let _server = HttpServer::new(config, state);
    }
}
