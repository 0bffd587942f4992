//! HTTP delivery
//!
//! A small read-only axum service in front of [`ReportCoordinator`]. Every
//! route except `/health` requires HTTP Basic credentials from
//! `[[server.users]]`.

pub mod auth;
pub mod routes;

pub use auth::UserTable;

use crate::config::ReportsConfig;
use crate::core::export::ReportCoordinator;
use crate::domain::{ReportError, Result};
use axum::middleware;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;

/// Shared state for axum handlers
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<ReportCoordinator>,
    pub users: Arc<UserTable>,
}

impl AppState {
    pub fn new(coordinator: ReportCoordinator, users: UserTable) -> Self {
        Self {
            coordinator: Arc::new(coordinator),
            users: Arc::new(users),
        }
    }
}

/// Build the axum router (separated for testing)
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/reports", get(routes::reports_archive))
        .route("/reports-json", get(routes::reports_json))
        .route("/reports-iqvia", get(routes::reports_iqvia))
        .route("/reports-closeup", get(routes::reports_closeup))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_basic_auth,
        ));

    Router::new()
        .route("/health", get(routes::health))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until `shutdown` flips to `true`
///
/// When `port` is 0, the OS assigns an ephemeral port. The actual bound
/// port is always logged.
pub async fn serve(
    config: &ReportsConfig,
    port: u16,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let users = UserTable::from_config(&config.server.users);
    if users.is_empty() {
        return Err(ReportError::Configuration(
            "server.users must list at least one account to serve reports".to_string(),
        ));
    }

    let coordinator = ReportCoordinator::from_config(config)?;
    let app = router(AppState::new(coordinator, users));

    let addr = format!("{}:{}", config.server.bind_address, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ReportError::Io(format!("Failed to bind {addr}: {e}")))?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, accounts = config.server.users.len(), "Report server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            // An Err means the sender is gone, which also ends the server
            while shutdown.changed().await.is_ok() {
                if *shutdown.borrow() {
                    break;
                }
            }
            tracing::info!("Report server shutting down");
        })
        .await?;

    Ok(())
}
