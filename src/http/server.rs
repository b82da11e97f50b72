//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit, metrics)
//! - Own the user repository for the lifetime of the server
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{ApiConfig, ServiceConfig};
use crate::http::handlers;
use crate::http::request::UuidRequestId;
use crate::observability::{metrics, tracing::make_request_span};
use crate::users::{InMemoryUserStore, UserRepository};

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub api: ApiConfig,
}

/// HTTP server for the users API.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
    users: Arc<dyn UserRepository>,
}

impl HttpServer {
    /// Create a server with an in-memory store built from `config.store`.
    pub fn new(config: ServiceConfig) -> Self {
        let store = if config.store.seed {
            InMemoryUserStore::seeded()
        } else {
            InMemoryUserStore::new()
        };
        Self::with_repository(config, Arc::new(store))
    }

    /// Create a server over an existing repository.
    pub fn with_repository(config: ServiceConfig, users: Arc<dyn UserRepository>) -> Self {
        let state = AppState {
            users: Arc::clone(&users),
            api: config.api.clone(),
        };
        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            users,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::greeting))
            .route(
                "/users",
                get(handlers::list_users).post(handlers::create_user),
            )
            .route(
                "/users/{user_id}",
                get(handlers::get_user)
                    .put(handlers::replace_user)
                    .delete(handlers::delete_user),
            )
            .route_layer(middleware::from_fn(metrics::track_requests))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                    .layer(RequestBodyLimitLayer::new(config.listener.max_body_bytes))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires (or its sender is dropped).
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            users = self.users.len(),
            strict_not_found = self.config.api.strict_not_found,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// The repository backing this server.
    pub fn users(&self) -> Arc<dyn UserRepository> {
        Arc::clone(&self.users)
    }

    /// Consume the server, returning its router (for in-process testing).
    pub fn into_router(self) -> Router {
        self.router
    }
}
