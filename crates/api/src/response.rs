//! Typed response envelopes for the admin and contact endpoints.
//!
//! The wire contract fixes a `success` flag on every payload. Using these
//! structs instead of ad-hoc `serde_json::json!` keeps the shapes
//! compile-checked and consistent across handlers.

use serde::Serialize;

use atelier_core::triage::TriageOverview;
use atelier_core::types::DbId;
use atelier_db::models::submission::{Submission, ViewStats};

/// Value of `migrationStatus` when the soft-delete column is missing.
pub const MIGRATION_STATUS_REQUIRED: &str = "required";

/// Envelope for `GET /api/admin/messages`.
#[derive(Debug, Serialize)]
pub struct ListEnvelope {
    pub success: bool,
    pub data: Vec<Submission>,
    pub stats: ViewStats,
    #[serde(rename = "migrationStatus", skip_serializing_if = "Option::is_none")]
    pub migration_status: Option<&'static str>,
}

/// Envelope for `POST /api/admin/messages`.
#[derive(Debug, Serialize)]
pub struct MutateEnvelope {
    pub success: bool,
    pub message: String,
}

/// Envelope for `GET /api/admin/messages/{id}`.
#[derive(Debug, Serialize)]
pub struct DetailEnvelope {
    pub success: bool,
    pub data: Submission,
}

/// Envelope for `GET /api/admin/messages/stats`.
#[derive(Debug, Serialize)]
pub struct OverviewEnvelope {
    pub success: bool,
    pub data: TriageOverview,
}

/// Envelope for `POST /api/contact`.
#[derive(Debug, Serialize)]
pub struct CreatedEnvelope {
    pub success: bool,
    pub id: DbId,
}
