//! Gateway seam between the manager and the messages API.
//!
//! Outcomes are a closed tagged union: every call resolves to `Ok`,
//! `SchemaMigrationRequired`, or `Failed`. Transport and parse errors are
//! folded into `Failed` so the controller never has to reason about error
//! types it cannot act on.

use async_trait::async_trait;
use serde::Deserialize;

use atelier_core::submission::{BulkAction, View};
use atelier_core::types::{DbId, Timestamp};

/// A submission row as the admin client sees it.
///
/// Deliberately independent of the server's model type: the client only
/// depends on the wire contract.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageRow {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub project_type: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub timeline: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    #[serde(default)]
    pub deleted_at: Option<Timestamp>,
}

/// View tab counters from the list endpoint.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Stats {
    pub active: i64,
    pub trash: i64,
    pub total: i64,
}

/// A successful list response.
#[derive(Debug, Clone)]
pub struct Listing {
    pub data: Vec<MessageRow>,
    pub stats: Stats,
    /// Set when the server answered in degraded (pre-migration) mode.
    pub migration_required: bool,
}

/// A successful bulk mutation response.
#[derive(Debug, Clone)]
pub struct Mutation {
    pub message: Option<String>,
}

/// Result of a gateway call.
#[derive(Debug, Clone)]
pub enum GatewayOutcome<T> {
    /// The server answered the request.
    Ok(T),
    /// The server cannot serve soft-delete features until its schema is
    /// migrated.
    SchemaMigrationRequired,
    /// Anything else: transport failure, bad payload, server-side error.
    Failed(String),
}

/// Transport seam for the messages API.
#[async_trait]
pub trait MessagesGateway: Send + Sync {
    /// Fetch one partition of the submission list.
    async fn list(&self, view: View) -> GatewayOutcome<Listing>;

    /// Apply a bulk action to a batch of ids (decimal strings on the wire).
    async fn mutate(&self, action: BulkAction, ids: &[String]) -> GatewayOutcome<Mutation>;
}

/// Classify a server error as the schema-migration signal.
///
/// Primary signal is the typed `errorCode`; the substring signature is kept
/// as a fallback for servers that predate the typed code.
pub fn is_schema_error(error_code: Option<&str>, message: &str) -> bool {
    if error_code == Some("SCHEMA_MIGRATION_REQUIRED") {
        return true;
    }
    message.contains("column") && message.contains("does not exist")
}
