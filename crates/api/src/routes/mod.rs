pub mod contact;
pub mod health;
pub mod messages;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /admin/messages              list (?view=active|trash), bulk mutate (POST)
/// /admin/messages/stats        triage overview (GET)
/// /admin/messages/{id}         submission detail (GET)
///
/// /contact                     public contact form intake (POST)
/// ```
///
/// The `/admin` subtree performs no authentication itself; deployments sit
/// behind an admin-auth boundary.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(messages::router())
        .merge(contact::router())
}
