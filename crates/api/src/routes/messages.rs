//! Route definitions for the admin messages resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::messages;
use crate::state::AppState;

/// Routes mounted at `/admin/messages`.
///
/// ```text
/// GET  /admin/messages          -> list         (?view=active|trash)
/// POST /admin/messages          -> bulk_mutate  ({action, messageIds})
/// GET  /admin/messages/stats    -> overview
/// GET  /admin/messages/{id}     -> detail
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/messages",
            get(messages::list).post(messages::bulk_mutate),
        )
        .route("/admin/messages/stats", get(messages::overview))
        .route("/admin/messages/{id}", get(messages::detail))
}
