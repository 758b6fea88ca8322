//! Repository for the `contact_submissions` table.
//!
//! Listing is partitioned by the nullable `deleted_at` column; bulk
//! mutations carry `WHERE` guards so the lifecycle invariants hold under
//! re-submission and concurrent admins: re-trashing a trashed row is a
//! no-op, and permanent deletion only ever touches rows already in the
//! trash (no active→gone shortcut).

use sqlx::PgPool;

use atelier_core::submission::View;
use atelier_core::types::{DbId, Timestamp};

use crate::models::submission::{NewSubmission, Submission, ViewStats};

/// Column list for `contact_submissions` queries.
const COLUMNS: &str = "\
    id, name, email, message, phone, company, project_type, budget, \
    timeline, notes, locale, status, created_at, updated_at, deleted_at";

/// Column list for databases where the soft-delete migration has not been
/// applied: synthesizes a NULL `deleted_at` so the same row type decodes.
const COLUMNS_LEGACY: &str = "\
    id, name, email, message, phone, company, project_type, budget, \
    timeline, notes, locale, status, created_at, updated_at, \
    NULL::timestamptz AS deleted_at";

/// Provides CRUD and lifecycle operations for contact submissions.
pub struct SubmissionRepo;

impl SubmissionRepo {
    // ── Creation ──────────────────────────────────────────────────────

    /// Insert a new submission with status `new`, returning its id.
    ///
    /// Deliberately returns only the id (not the full row) so the insert
    /// works identically before and after the soft-delete migration.
    pub async fn create(pool: &PgPool, input: &NewSubmission) -> Result<DbId, sqlx::Error> {
        let row: (DbId,) = sqlx::query_as(
            "INSERT INTO contact_submissions \
                (name, email, message, phone, company, project_type, \
                 budget, timeline, locale) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.message)
        .bind(&input.phone)
        .bind(&input.company)
        .bind(&input.project_type)
        .bind(&input.budget)
        .bind(&input.timeline)
        .bind(&input.locale)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    // ── Reading ───────────────────────────────────────────────────────

    /// Find a submission by id regardless of trash state.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contact_submissions WHERE id = $1");
        sqlx::query_as::<_, Submission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one partition of the submission table, newest first.
    ///
    /// The admin list is deliberately un-paginated.
    pub async fn list_view(pool: &PgPool, view: View) -> Result<Vec<Submission>, sqlx::Error> {
        let predicate = match view {
            View::Active => "deleted_at IS NULL",
            View::Trash => "deleted_at IS NOT NULL",
        };
        let query = format!(
            "SELECT {COLUMNS} FROM contact_submissions \
             WHERE {predicate} ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Submission>(&query).fetch_all(pool).await
    }

    /// List every row on a database without the soft-delete column.
    pub async fn list_all_legacy(pool: &PgPool) -> Result<Vec<Submission>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS_LEGACY} FROM contact_submissions ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Submission>(&query).fetch_all(pool).await
    }

    /// Counts for both partitions in a single snapshot, so
    /// `total == active + trash` holds by construction.
    pub async fn stats(pool: &PgPool) -> Result<ViewStats, sqlx::Error> {
        sqlx::query_as::<_, ViewStats>(
            "SELECT \
                COUNT(*) FILTER (WHERE deleted_at IS NULL) AS active, \
                COUNT(*) FILTER (WHERE deleted_at IS NOT NULL) AS trash, \
                COUNT(*) AS total \
             FROM contact_submissions",
        )
        .fetch_one(pool)
        .await
    }

    /// Total row count for legacy (pre-migration) stats.
    pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM contact_submissions")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// `(status, created_at)` pairs for active submissions, feeding the
    /// triage overview.
    pub async fn status_created_pairs(
        pool: &PgPool,
    ) -> Result<Vec<(String, Timestamp)>, sqlx::Error> {
        sqlx::query_as(
            "SELECT status, created_at FROM contact_submissions \
             WHERE deleted_at IS NULL",
        )
        .fetch_all(pool)
        .await
    }

    // ── Lifecycle mutations ───────────────────────────────────────────

    /// Move a batch of active submissions to the trash.
    ///
    /// Already-trashed ids are skipped by the guard, making re-submission
    /// idempotent. Returns the number of rows affected.
    pub async fn move_to_trash(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE contact_submissions \
             SET deleted_at = now(), updated_at = now() \
             WHERE id = ANY($1) AND deleted_at IS NULL",
        )
        .bind(ids)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Restore a batch of trashed submissions to the active view.
    ///
    /// Restoring an already-active id is a no-op, not an error.
    pub async fn restore(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE contact_submissions \
             SET deleted_at = NULL, updated_at = now() \
             WHERE id = ANY($1) AND deleted_at IS NOT NULL",
        )
        .bind(ids)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Permanently delete a batch of trashed submissions.
    ///
    /// The guard enforces the one real workflow invariant: a row must pass
    /// through the trash before it can be removed, so a stray purge on
    /// active ids affects zero rows.
    pub async fn purge(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM contact_submissions \
             WHERE id = ANY($1) AND deleted_at IS NOT NULL",
        )
        .bind(ids)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    // ── Schema probe ──────────────────────────────────────────────────

    /// Whether the soft-delete migration has been applied.
    ///
    /// Probed up front (instead of catching 42703 mid-query) so the
    /// degraded active listing never depends on error parsing.
    pub async fn soft_delete_column_present(pool: &PgPool) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS ( \
                SELECT 1 FROM information_schema.columns \
                WHERE table_name = 'contact_submissions' \
                  AND column_name = 'deleted_at' \
             )",
        )
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}
