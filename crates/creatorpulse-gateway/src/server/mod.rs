//! Gateway Server
//!
//! HTTP server exposing the token-exchange API to the dashboard and the
//! OAuth callback to the provider. Stateless between requests: the shared
//! state is the immutable settings plus a pooled HTTP client, so concurrent
//! exchanges need no locking.

mod handlers;

pub use handlers::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::provider::ProviderClient;
use crate::settings::{GatewaySettings, OAUTH_CALLBACK_PATH};

/// Gateway server configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Enable CORS for browser access
    pub enable_cors: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            enable_cors: true,
        }
    }
}

impl GatewayConfig {
    /// Get the socket address
    pub fn addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid address")
    }
}

/// Token-exchange gateway server.
pub struct GatewayServer {
    config: GatewayConfig,
    state: AppState,
}

impl GatewayServer {
    pub fn new(config: GatewayConfig, settings: GatewaySettings, provider: ProviderClient) -> Self {
        Self {
            config,
            state: AppState {
                settings: Arc::new(settings),
                provider,
            },
        }
    }

    /// Build the Axum router
    fn build_router(&self) -> Router {
        let mut router = Router::new()
            // Health check (public)
            .route("/", get(handlers::health))
            // Provider redirects the browser here after consent
            .route(OAUTH_CALLBACK_PATH, get(handlers::oauth_callback))
            // Dashboard-driven exchange endpoints
            .route("/exchange-token", post(handlers::exchange_token))
            .route("/get-long-lived-token", post(handlers::long_lived_token))
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            router = router.layer(cors);
        }

        router
    }

    /// Run the gateway server until shutdown.
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.config.addr();

        info!("[Gateway] Starting on {}", addr);
        info!(
            "[Gateway] OAuth callback endpoint: {}",
            self.state.settings.redirect_uri()
        );
        info!(
            "[Gateway] Frontend URL: {}",
            self.state.settings.frontend_url
        );
        info!(
            "[Gateway] CORS: {}",
            if self.config.enable_cors {
                "enabled"
            } else {
                "disabled"
            }
        );

        let router = self.build_router();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!("[Gateway] Ready to accept requests");

        axum::serve(listener, router).await?;

        Ok(())
    }

    /// Bind (possibly to an ephemeral port) and serve in the background,
    /// returning the bound address.
    pub async fn spawn(self) -> anyhow::Result<SocketAddr> {
        let listener = tokio::net::TcpListener::bind(self.config.addr()).await?;
        let addr = listener.local_addr()?;
        let router = self.build_router();

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("[Gateway] Server error: {}", e);
            }
        });

        Ok(addr)
    }
}
