//! Submission lifecycle vocabulary shared by the server and the admin client.
//!
//! A submission lives in exactly one of two partitions at any time: active
//! (`deleted_at` is NULL) or trashed (`deleted_at` is set). [`TrashState`]
//! makes that partition explicit so domain code never inspects the nullable
//! column directly; the mapping happens once at the persistence boundary.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Informational status tags set by the triage workflow.
///
/// Not to be confused with the trash partition: a `completed` submission can
/// still be moved to trash, and a `new` one restored from it.
pub const VALID_STATUSES: &[&str] = &[
    "new",
    "read",
    "replied",
    "contacted",
    "in-progress",
    "completed",
];

/// Status assigned to every submission at creation.
pub const STATUS_NEW: &str = "new";

/// Validate a status tag against the known set.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid status '{status}', expected one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

/// The two partitions a submission can occupy.
///
/// Maps to and from the nullable `deleted_at` column. There is no third
/// state: permanent deletion removes the row entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrashState {
    Active,
    Trashed(Timestamp),
}

impl TrashState {
    /// Map from the persistence representation.
    pub fn from_deleted_at(deleted_at: Option<Timestamp>) -> Self {
        match deleted_at {
            None => Self::Active,
            Some(at) => Self::Trashed(at),
        }
    }

    /// Map back to the persistence representation.
    pub fn deleted_at(self) -> Option<Timestamp> {
        match self {
            Self::Active => None,
            Self::Trashed(at) => Some(at),
        }
    }

    pub fn is_trashed(self) -> bool {
        matches!(self, Self::Trashed(_))
    }
}

/// The admin UI's partition filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Active,
    Trash,
}

impl View {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Trash => "trash",
        }
    }

    /// Parse the `view` query parameter value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "trash" => Some(Self::Trash),
            _ => None,
        }
    }
}

/// A bulk mutation applied to a batch of selected submission ids.
///
/// Wire names follow the JSON contract of the admin messages endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulkAction {
    #[serde(rename = "moveToTrash")]
    MoveToTrash,
    #[serde(rename = "restore")]
    Restore,
    #[serde(rename = "permanentDelete")]
    PermanentDelete,
}

impl BulkAction {
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::MoveToTrash => "moveToTrash",
            Self::Restore => "restore",
            Self::PermanentDelete => "permanentDelete",
        }
    }

    /// Parse the `action` field of a bulk mutation request.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "moveToTrash" => Some(Self::MoveToTrash),
            "restore" => Some(Self::Restore),
            "permanentDelete" => Some(Self::PermanentDelete),
            _ => None,
        }
    }

    /// Whether this action removes data beyond recovery.
    pub fn is_irreversible(self) -> bool {
        matches!(self, Self::PermanentDelete)
    }
}
