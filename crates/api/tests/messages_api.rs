//! HTTP-level integration tests for the admin messages API.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router.
//! Rows are seeded via the repository layer, then listed and mutated
//! through the HTTP contract.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json};
use serde_json::json;
use sqlx::PgPool;

use atelier_db::models::submission::NewSubmission;
use atelier_db::repositories::SubmissionRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_submission(name: &str) -> NewSubmission {
    NewSubmission {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        message: "Looking for a full redesign.".to_string(),
        phone: None,
        company: Some("Example SARL".to_string()),
        project_type: Some("e-commerce".to_string()),
        budget: None,
        timeline: None,
        locale: Some("fr".to_string()),
    }
}

async fn seed(pool: &PgPool, names: &[&str]) -> Vec<i64> {
    let mut ids = Vec::with_capacity(names.len());
    for name in names {
        ids.push(
            SubmissionRepo::create(pool, &new_submission(name))
                .await
                .unwrap(),
        );
    }
    ids
}

fn bulk_body(action: &str, ids: &[i64]) -> serde_json::Value {
    json!({
        "action": action,
        "messageIds": ids.iter().map(|id| id.to_string()).collect::<Vec<_>>(),
    })
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn list_active_is_empty_initially(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/admin/messages?view=active").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert!(body["data"].as_array().unwrap().is_empty());
    assert_eq!(body["stats"]["active"], 0);
    assert_eq!(body["stats"]["trash"], 0);
    assert_eq!(body["stats"]["total"], 0);
    assert!(body.get("migrationStatus").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn views_partition_and_stats_add_up(pool: PgPool) {
    let ids = seed(&pool, &["Anna", "Boris", "Claire"]).await;
    let app = build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/admin/messages",
        bulk_body("moveToTrash", &ids[..1]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let active = body_json(get(app.clone(), "/api/admin/messages?view=active").await).await;
    let trash = body_json(get(app, "/api/admin/messages?view=trash").await).await;

    assert_eq!(active["data"].as_array().unwrap().len(), 2);
    assert_eq!(trash["data"].as_array().unwrap().len(), 1);
    assert_eq!(trash["data"][0]["id"].as_i64(), Some(ids[0]));
    assert!(trash["data"][0]["deleted_at"].is_string());
    assert!(active["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|row| row["deleted_at"].is_null()));

    for body in [&active, &trash] {
        let stats = &body["stats"];
        assert_eq!(
            stats["total"].as_i64().unwrap(),
            stats["active"].as_i64().unwrap() + stats["trash"].as_i64().unwrap()
        );
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_view_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/admin/messages?view=archived").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["errorCode"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Bulk mutation round trip
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn trash_then_restore_round_trips(pool: PgPool) {
    let ids = seed(&pool, &["Marie"]).await;
    let before = SubmissionRepo::find_by_id(&pool, ids[0])
        .await
        .unwrap()
        .unwrap();
    let app = build_test_app(pool);

    post_json(
        app.clone(),
        "/api/admin/messages",
        bulk_body("moveToTrash", &ids),
    )
    .await;
    let response = post_json(
        app.clone(),
        "/api/admin/messages",
        bulk_body("restore", &ids),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "1 message(s) restored");

    let active = body_json(get(app, "/api/admin/messages?view=active").await).await;
    let row = &active["data"][0];
    assert_eq!(row["id"].as_i64(), Some(ids[0]));
    assert!(row["deleted_at"].is_null());
    assert_eq!(row["email"].as_str().unwrap(), before.email);
    assert_eq!(row["message"].as_str().unwrap(), before.message);
    assert_eq!(row["status"].as_str().unwrap(), before.status);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn permanent_delete_requires_the_trash(pool: PgPool) {
    let ids = seed(&pool, &["Igor"]).await;
    let app = build_test_app(pool);

    // Active rows are skipped by the purge guard.
    let response = post_json(
        app.clone(),
        "/api/admin/messages",
        bulk_body("permanentDelete", &ids),
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["message"], "0 message(s) permanently deleted");

    // Through the trash, the row is gone for good.
    post_json(
        app.clone(),
        "/api/admin/messages",
        bulk_body("moveToTrash", &ids),
    )
    .await;
    let response = post_json(
        app.clone(),
        "/api/admin/messages",
        bulk_body("permanentDelete", &ids),
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["message"], "1 message(s) permanently deleted");

    // Neither restore nor moveToTrash can resurrect it.
    post_json(
        app.clone(),
        "/api/admin/messages",
        bulk_body("restore", &ids),
    )
    .await;
    let active = body_json(get(app.clone(), "/api/admin/messages?view=active").await).await;
    let trash = body_json(get(app, "/api/admin/messages?view=trash").await).await;
    assert!(active["data"].as_array().unwrap().is_empty());
    assert!(trash["data"].as_array().unwrap().is_empty());
    assert_eq!(active["stats"]["total"], 0);
}

// ---------------------------------------------------------------------------
// Request validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_id_set_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(app, "/api/admin/messages", bulk_body("moveToTrash", &[])).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "messageIds must not be empty");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_action_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/admin/messages",
        json!({ "action": "shred", "messageIds": ["1"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Unknown action: shred");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_numeric_id_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/admin/messages",
        json!({ "action": "restore", "messageIds": ["abc"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid message id: abc");
}

// ---------------------------------------------------------------------------
// Detail and overview
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn detail_returns_the_row_or_404(pool: PgPool) {
    let ids = seed(&pool, &["Sophie"]).await;
    let app = build_test_app(pool);

    let response = get(app.clone(), &format!("/api/admin/messages/{}", ids[0])).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["name"], "Sophie");

    let response = get(app, "/api/admin/messages/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["errorCode"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn overview_counts_active_submissions(pool: PgPool) {
    let ids = seed(&pool, &["A", "B", "C"]).await;
    SubmissionRepo::move_to_trash(&pool, &ids[..1]).await.unwrap();
    let app = build_test_app(pool);

    let body = body_json(get(app, "/api/admin/messages/stats").await).await;
    assert_eq!(body["success"], true);
    // Trashed rows are excluded from triage.
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["by_status"][0]["status"], "new");
    assert_eq!(body["data"]["by_status"][0]["count"], 2);
    // Fresh `new` submissions land in the medium bucket.
    assert_eq!(body["data"]["priorities"]["medium"], 2);
}

// ---------------------------------------------------------------------------
// Migration-required degraded mode (soft-delete column absent)
// ---------------------------------------------------------------------------

async fn apply_base_schema(pool: &PgPool) {
    sqlx::raw_sql(include_str!(
        "../../db/migrations/0001_contact_submissions.sql"
    ))
    .execute(pool)
    .await
    .expect("base schema should apply");
}

#[sqlx::test(migrations = false)]
async fn active_view_degrades_with_migration_status(pool: PgPool) {
    apply_base_schema(&pool).await;
    let ids = seed(&pool, &["Legacy"]).await;
    let app = build_test_app(pool);

    let response = get(app, "/api/admin/messages?view=active").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["migrationStatus"], "required");
    assert_eq!(body["data"][0]["id"].as_i64(), Some(ids[0]));
    assert_eq!(body["stats"]["active"], 1);
    assert_eq!(body["stats"]["trash"], 0);
    assert_eq!(body["stats"]["total"], 1);
}

#[sqlx::test(migrations = false)]
async fn trash_view_fails_with_typed_schema_error(pool: PgPool) {
    apply_base_schema(&pool).await;
    let app = build_test_app(pool);

    let response = get(app, "/api/admin/messages?view=trash").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["errorCode"], "SCHEMA_MIGRATION_REQUIRED");
    assert_eq!(body["migrationRequired"], true);
    // The message keeps the legacy signature older clients sniff for.
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("column"));
    assert!(message.contains("does not exist"));
}

#[sqlx::test(migrations = false)]
async fn mutations_fail_with_typed_schema_error(pool: PgPool) {
    apply_base_schema(&pool).await;
    let ids = seed(&pool, &["Legacy"]).await;
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/admin/messages",
        bulk_body("moveToTrash", &ids),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["errorCode"], "SCHEMA_MIGRATION_REQUIRED");
    assert_eq!(body["migrationRequired"], true);
}
