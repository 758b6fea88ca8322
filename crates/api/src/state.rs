use std::sync::Arc;

use crate::config::ServerConfig;
use crate::notifications::mailer::Mailer;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: atelier_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Optional SMTP notifier for new submissions.
    pub mailer: Option<Arc<Mailer>>,
}
