//! Handlers for the admin messages resource.
//!
//! Listing is partitioned by `view` (active or trash); mutation is a single
//! bulk endpoint dispatching on `action`. When the soft-delete column is
//! missing, the active listing degrades gracefully (all rows, trash count
//! zero, `migrationStatus: "required"`) while trash listing and every
//! mutation fail with the typed schema-migration error.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use atelier_core::error::CoreError;
use atelier_core::submission::{BulkAction, View};
use atelier_core::triage::TriageOverview;
use atelier_core::types::DbId;
use atelier_db::models::submission::ViewStats;
use atelier_db::repositories::SubmissionRepo;

use crate::error::{AppError, AppResult};
use crate::response::{
    DetailEnvelope, ListEnvelope, MutateEnvelope, OverviewEnvelope, MIGRATION_STATUS_REQUIRED,
};
use crate::state::AppState;

/// Query parameters for the list endpoint.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Partition filter; defaults to the active view.
    pub view: Option<String>,
}

/// Body of a bulk mutation request.
///
/// `action` and `messageIds` arrive as strings; both are validated here
/// before anything touches the database.
#[derive(Debug, Deserialize)]
pub struct BulkRequest {
    pub action: String,
    #[serde(rename = "messageIds")]
    pub message_ids: Vec<String>,
}

/// GET /admin/messages?view={active|trash}
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> AppResult<Json<ListEnvelope>> {
    let view = parse_view(params.view.as_deref())?;

    if SubmissionRepo::soft_delete_column_present(&state.pool).await? {
        let data = SubmissionRepo::list_view(&state.pool, view).await?;
        let stats = SubmissionRepo::stats(&state.pool).await?;
        return Ok(Json(ListEnvelope {
            success: true,
            data,
            stats,
            migration_status: None,
        }));
    }

    // Degraded mode: without the column there is no trash partition.
    match view {
        View::Active => {
            let data = SubmissionRepo::list_all_legacy(&state.pool).await?;
            let total = data.len() as i64;
            Ok(Json(ListEnvelope {
                success: true,
                data,
                stats: ViewStats::all_active(total),
                migration_status: Some(MIGRATION_STATUS_REQUIRED),
            }))
        }
        View::Trash => Err(AppError::SchemaMigrationRequired),
    }
}

/// POST /admin/messages
///
/// Applies one action to a batch of submission ids. Re-issuing the same
/// request is safe: the repository guards make every action a no-op on rows
/// already in the target state.
pub async fn bulk_mutate(
    State(state): State<AppState>,
    Json(input): Json<BulkRequest>,
) -> AppResult<Json<MutateEnvelope>> {
    let action = BulkAction::from_wire(&input.action)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown action: {}", input.action)))?;
    let ids = parse_ids(&input.message_ids)?;

    if !SubmissionRepo::soft_delete_column_present(&state.pool).await? {
        return Err(AppError::SchemaMigrationRequired);
    }

    let affected = match action {
        BulkAction::MoveToTrash => SubmissionRepo::move_to_trash(&state.pool, &ids).await?,
        BulkAction::Restore => SubmissionRepo::restore(&state.pool, &ids).await?,
        BulkAction::PermanentDelete => SubmissionRepo::purge(&state.pool, &ids).await?,
    };

    tracing::info!(
        action = action.as_wire(),
        requested = ids.len(),
        affected,
        "Bulk message action applied"
    );

    Ok(Json(MutateEnvelope {
        success: true,
        message: describe(action, affected),
    }))
}

/// GET /admin/messages/{id}
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DetailEnvelope>> {
    let submission = SubmissionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Submission",
            id,
        }))?;
    Ok(Json(DetailEnvelope {
        success: true,
        data: submission,
    }))
}

/// GET /admin/messages/stats
///
/// Derived triage stats over the active view: counts by status plus
/// priority-by-age buckets.
pub async fn overview(State(state): State<AppState>) -> AppResult<Json<OverviewEnvelope>> {
    let pairs = SubmissionRepo::status_created_pairs(&state.pool).await?;
    let data = TriageOverview::compute(
        pairs.iter().map(|(status, created)| (status.as_str(), *created)),
        chrono::Utc::now(),
    );
    Ok(Json(OverviewEnvelope {
        success: true,
        data,
    }))
}

// ── Private helpers ──────────────────────────────────────────────────────

fn parse_view(value: Option<&str>) -> Result<View, AppError> {
    match value {
        None => Ok(View::Active),
        Some(v) => {
            View::parse(v).ok_or_else(|| AppError::BadRequest(format!("Unknown view: {v}")))
        }
    }
}

/// Parse the wire id strings into database ids, rejecting the whole batch
/// on an empty set or any unparseable entry.
fn parse_ids(raw: &[String]) -> Result<Vec<DbId>, AppError> {
    if raw.is_empty() {
        return Err(AppError::BadRequest(
            "messageIds must not be empty".to_string(),
        ));
    }
    raw.iter()
        .map(|s| {
            s.parse::<DbId>()
                .map_err(|_| AppError::BadRequest(format!("Invalid message id: {s}")))
        })
        .collect()
}

fn describe(action: BulkAction, affected: u64) -> String {
    match action {
        BulkAction::MoveToTrash => format!("{affected} message(s) moved to trash"),
        BulkAction::Restore => format!("{affected} message(s) restored"),
        BulkAction::PermanentDelete => format!("{affected} message(s) permanently deleted"),
    }
}
