// Application server configuration and setup

use std::time::Duration;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    error_handling::HandleErrorLayer,
};
use tower::{ServiceBuilder, timeout::TimeoutLayer};
use tokio::{signal, net::TcpListener};
use listenfd::ListenFd;
use anyhow::{Context, Result};

use crate::config::environment::EnvironmentVariables;
use crate::config::state::AppState;
use crate::api::{health::health_routes, postgresql::postgresql_routes};
use crate::utils::error_handler::handle_global_error;

/// Creates and configures the application router with all middleware layers.
/// The request timeout covers `/health` only: `/postgresql` is bounded by the
/// database connect timeout so its connection is never abandoned mid-call.
pub fn create_app(state: AppState) -> Router {
    let env: &EnvironmentVariables = &state.environment;
    let timeout: Duration = Duration::from_secs(env.default_timeout_seconds);
    let max_body_size: usize = env.max_request_body_size;

    let health: Router<AppState> = health_routes().layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_global_error))
            .layer(TimeoutLayer::new(timeout))
    );

    Router::new()
        .merge(health)
        .merge(postgresql_routes())
        .layer(DefaultBodyLimit::max(max_body_size))
        .with_state(state)
}

/// Takes a socket-activated listener when one was passed in, otherwise binds `HOST:PORT`
pub async fn setup_listener(env: &EnvironmentVariables) -> Result<TcpListener> {
    if let Some(inherited) = ListenFd::from_env().take_tcp_listener(0)? {
        inherited.set_nonblocking(true)?;
        let listener: TcpListener = TcpListener::from_std(inherited)?;
        tracing::info!("Using inherited listener on {}", listener.local_addr()?);
        return Ok(listener);
    }

    let addr: String = format!("{}:{}", env.host, env.port);
    TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))
}

/// Handles graceful shutdown signals (Ctrl+C and TERM)
pub async fn shutdown_signal() {
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
                tracing::error!("Failed to install TERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Shutting down via Ctrl+C"),
        _ = terminate => tracing::info!("Shutting down via TERM signal"),
    }
}
