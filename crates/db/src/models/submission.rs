//! Contact submission entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use atelier_core::submission::TrashState;
use atelier_core::types::{DbId, Timestamp};

/// A row from the `contact_submissions` table.
///
/// All form-supplied fields are immutable after creation; the triage
/// workflow only touches `status`, `updated_at`, and `deleted_at`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Submission {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub message: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub project_type: Option<String>,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub notes: Option<String>,
    pub locale: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl Submission {
    /// The partition this row occupies, mapped once at the boundary.
    pub fn trash_state(&self) -> TrashState {
        TrashState::from_deleted_at(self.deleted_at)
    }
}

/// DTO for the public contact endpoint.
///
/// Field names follow the form's JSON payload (camelCase for the one
/// multi-word field).
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewSubmission {
    #[validate(length(min = 1, max = 200, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "a valid email address is required"))]
    pub email: String,
    #[validate(length(min = 1, max = 10_000, message = "message is required"))]
    pub message: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub project_type: Option<String>,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub locale: Option<String>,
}

/// Counts backing the admin list view tabs.
///
/// Invariant: `total == active + trash` whenever these are produced from a
/// single query or a consistent snapshot.
#[derive(Debug, Clone, Copy, FromRow, Serialize)]
pub struct ViewStats {
    pub active: i64,
    pub trash: i64,
    pub total: i64,
}

impl ViewStats {
    /// Stats for a database without the soft-delete column: everything is
    /// active by definition.
    pub fn all_active(total: i64) -> Self {
        Self {
            active: total,
            trash: 0,
            total,
        }
    }
}
