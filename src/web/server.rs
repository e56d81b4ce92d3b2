//! HTTP server assembly and lifecycle.
//!
//! Builds the router over the shared [`AppState`], binds the configured
//! address and serves until Ctrl+C. The body limit sits slightly above the
//! PDF validation limit so oversized uploads are rejected by the validator
//! with a proper JSON body instead of a closed connection.

use super::handlers::{self, AppState};
use crate::db::atendimentos::Atendimentos;
use crate::libs::audit::AuditLog;
use crate::libs::config::Config;
use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::validation::MAX_PDF_SIZE;
use crate::{msg_info, msg_success};
use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

pub const UPLOADS_DIR_NAME: &str = "uploads";

// Multipart framing overhead on top of the PDF itself.
const BODY_LIMIT: usize = MAX_PDF_SIZE + 1024 * 1024;

impl AppState {
    /// Opens the database, the audit log and the uploads directory.
    pub fn new(config: &Config) -> Result<Self> {
        let atendimentos = Atendimentos::new()?;
        msg_info!(Message::DatabaseReady);

        let audit = AuditLog::new()?.with_max_size(config.audit_max_log_size());
        let uploads_dir = DataStorage::new().get_dir(UPLOADS_DIR_NAME)?;

        Ok(Self {
            atendimentos,
            audit,
            uploads_dir,
        })
    }
}

/// Assembles the application router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/api/health", get(handlers::health))
        .route("/api/atendimentos", get(handlers::list_atendimentos).post(handlers::create_atendimento))
        .route(
            "/api/atendimentos/:id",
            axum::routing::put(handlers::update_atendimento).delete(handlers::delete_atendimento),
        )
        .route("/api/stats", get(handlers::stats))
        .route("/api/uploads", get(handlers::list_uploads).post(handlers::upload_documento))
        .route("/api/uploads/:name", get(handlers::download_documento))
        .route("/api/audit", get(handlers::audit_tail))
        .route("/api/audit/clear", post(handlers::audit_clear))
        .route("/api/seed", post(handlers::seed_demo))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the dashboard and JSON API until interrupted.
pub async fn run(addr: &str, port: u16) -> Result<()> {
    let config = Config::read()?;
    let state = AppState::new(&config)?;
    let app = router(state);

    let bind = format!("{}:{}", addr, port);
    let listener = TcpListener::bind(&bind).await?;
    msg_success!(Message::ServerStarted(bind));

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    msg_info!(Message::ServerStopped);
    Ok(())
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
}
