//! HTTP-level integration tests for the public contact endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn valid_submission_is_created(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/contact",
        json!({
            "name": "Marie Dubois",
            "email": "marie@example.com",
            "message": "Nous cherchons une refonte complète.",
            "locale": "fr",
            "projectType": "vitrine",
            "company": "Dubois & Fils"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    let id = body["id"].as_i64().unwrap();

    // The new submission lands in the active view with status `new`.
    let list = body_json(get(app, "/api/admin/messages?view=active").await).await;
    let row = &list["data"][0];
    assert_eq!(row["id"].as_i64(), Some(id));
    assert_eq!(row["status"], "new");
    assert_eq!(row["project_type"], "vitrine");
    assert_eq!(row["locale"], "fr");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_email_is_rejected_before_insert(pool: PgPool) {
    let app = build_test_app(pool.clone());

    let response = post_json(
        app,
        "/api/contact",
        json!({
            "name": "Marie",
            "email": "not-an-email",
            "message": "Bonjour"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["errorCode"], "VALIDATION_ERROR");
    assert!(body["error"].as_str().unwrap().contains("email"));

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM contact_submissions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_required_fields_are_rejected(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/contact",
        json!({
            "name": "",
            "email": "marie@example.com",
            "message": ""
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("name"));
    assert!(message.contains("message"));
}

#[sqlx::test(migrations = false)]
async fn intake_still_works_before_soft_delete_migration(pool: PgPool) {
    sqlx::raw_sql(include_str!(
        "../../db/migrations/0001_contact_submissions.sql"
    ))
    .execute(&pool)
    .await
    .unwrap();
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/contact",
        json!({
            "name": "Igor",
            "email": "igor@example.com",
            "message": "Здравствуйте!"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}
