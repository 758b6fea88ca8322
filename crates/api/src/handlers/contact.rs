//! Handler for the public contact form intake.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use atelier_core::error::CoreError;
use atelier_db::models::submission::NewSubmission;
use atelier_db::repositories::SubmissionRepo;

use crate::error::AppResult;
use crate::response::CreatedEnvelope;
use crate::state::AppState;

/// POST /contact
///
/// Validates the form payload, inserts the submission with status `new`,
/// and fires the optional notification mail without blocking the response.
pub async fn submit(
    State(state): State<AppState>,
    Json(input): Json<NewSubmission>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(flatten_validation_errors(&e)))?;

    let id = SubmissionRepo::create(&state.pool, &input).await?;

    tracing::info!(
        submission_id = id,
        locale = input.locale.as_deref().unwrap_or("fr"),
        "Contact submission received"
    );

    if let Some(mailer) = state.mailer.clone() {
        let name = input.name.clone();
        let email = input.email.clone();
        tokio::spawn(async move {
            mailer.notify_new_submission(id, &name, &email).await;
        });
    }

    Ok((StatusCode::CREATED, Json(CreatedEnvelope { success: true, id })))
}

/// Collapse validator's per-field error map into one readable message.
fn flatten_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let detail = errs
                .first()
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| "is invalid".to_string());
            format!("{field}: {detail}")
        })
        .collect();
    parts.sort();
    parts.join("; ")
}
