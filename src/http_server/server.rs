//! # HTTP Server
//!
//! Combines the pizza, root and documentation routers behind the CORS and
//! request-tracing layers.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::db::PizzaDb;

use super::config::HttpServerConfig;
use super::docs::docs_routes;
use super::pizza_routes::{pizza_routes, PizzaState};
use super::root_routes::root_routes;

/// HTTP Server for the pizza store
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server serving `db`
    pub fn with_config(config: HttpServerConfig, db: Arc<PizzaDb>) -> Self {
        let router = build_router(&config, db);
        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl-C
    pub async fn start(self) -> Result<(), io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, "event=http_listen status=ok");
        tracing::info!("API documentation at http://{}/swagger", addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("event=http_shutdown status=ok");
        Ok(())
    }
}

/// Build the combined router with all endpoints
pub fn build_router(config: &HttpServerConfig, db: Arc<PizzaDb>) -> Router {
    let pizza_state = Arc::new(PizzaState::new(db));

    Router::new()
        .merge(root_routes())
        .merge(pizza_routes(pizza_state))
        .merge(docs_routes())
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
}

/// CORS policy from configuration
pub fn cors_layer(config: &HttpServerConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allows_any_origin() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|s| match s.parse() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!(origin = %s, "event=cors_origin_skipped reason=invalid");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "event=shutdown_signal status=error");
        std::future::pending::<()>().await;
    }
}
