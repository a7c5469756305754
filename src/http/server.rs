//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, limits, request ID)
//! - Share application state with handlers
//! - Apply hot config updates while running
//! - Serve until the shutdown signal fires

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::body::Body;
use axum::http::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{any, get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::auth::handlers as auth_handlers;
use crate::auth::UserStore;
use crate::chat::{MessageHistory, RoomRegistry};
use crate::config::RelayConfig;
use crate::http::{diagnostics, websocket};
use crate::observability::metrics;
use crate::security::rate_limit::{rate_limit_middleware, RateLimiterState};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Active configuration; swapped atomically on reload.
    pub config: Arc<ArcSwap<RelayConfig>>,
    pub users: Arc<UserStore>,
    pub rooms: Arc<RoomRegistry>,
    pub history: Arc<MessageHistory>,
    pub limiter: Arc<RateLimiterState>,
}

/// HTTP server for the chat relay.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Self {
        let state = AppState {
            config: Arc::new(ArcSwap::from_pointee(config.clone())),
            users: Arc::new(UserStore::new()),
            rooms: Arc::new(RoomRegistry::new()),
            history: Arc::new(MessageHistory::new()),
            limiter: Arc::new(RateLimiterState::new()),
        };

        let router = Self::build_router(&config, state.clone());
        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        // Only the credential endpoints are rate limited.
        let credential_routes = Router::new()
            .route("/register", post(auth_handlers::register))
            .route("/login", post(auth_handlers::login))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                rate_limit_middleware,
            ));

        Router::new()
            .route("/test", any(diagnostics::test_probe))
            .route("/chatting", any(diagnostics::chatting_probe))
            .route("/ws", get(websocket::chat_ws))
            .merge(credential_routes)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(middleware::from_fn(track_requests))
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Configs arriving on `config_updates` are swapped in atomically;
    /// handlers pick them up on their next request. The server drains and
    /// returns once `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<RelayConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let active_config = self.state.config.clone();
        tokio::spawn(async move {
            while let Some(next_config) = config_updates.recv().await {
                tracing::info!("Applying updated configuration");
                active_config.store(Arc::new(next_config));
            }
        });

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Shared application state (rooms, users, history).
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Record request count and latency for every handled request.
async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    metrics::record_request(&method, &path, response.status().as_u16(), start);
    response
}
