//! ServerBuilder for assembling and serving the admin API

use anyhow::Result;
use axum::Router;
use axum::middleware;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth::require_session;
use super::router::build_routes;
use super::state::AppState;
use crate::config::AdminConfig;

/// Builder for the admin HTTP server
///
/// # Example
///
/// ```ignore
/// let config = AdminConfig::load("bouquet.yaml")?;
/// ServerBuilder::from_config(config)?
///     .serve("127.0.0.1:3000")
///     .await?;
/// ```
pub struct ServerBuilder {
    state: AppState,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Build the state matching the configured mode
    pub fn from_config(config: AdminConfig) -> Result<Self> {
        Ok(Self::with_state(AppState::from_config(config)?))
    }

    /// Use an already assembled state, e.g. test fixtures
    pub fn with_state(state: AppState) -> Self {
        Self {
            state,
            custom_routes: Vec::new(),
        }
    }

    /// Add routes outside the admin API
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Build the final router with tracing, CORS and the optional session gate
    pub fn build(self) -> Router {
        let mut app = build_routes(&self.state);
        for custom in self.custom_routes {
            app = app.merge(custom);
        }

        if self.state.config.auth.require_session {
            app = app.layer(middleware::from_fn(require_session));
        }

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        app.layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `addr` and stops on SIGTERM or Ctrl+C.
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build();
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
