//! Axum route handlers for the jobs board and the HR review API.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::gateway::scoring::DEFAULT_RESUME_MIME_TYPE;
use crate::gateway::ResumeDocument;
use crate::models::{Application, ApplicationId, ApplicationStatus, Job, JobId};
use crate::recruiting::assessment::{send_assessment, AssessmentDispatch};
use crate::recruiting::jobs::{post_job, rank_by_score, NewJobRequest};
use crate::recruiting::submit::{submit_application, CandidateSubmission};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub application: Application,
    pub status_label: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: ApplicationStatus,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Json<Vec<Job>> {
    Json(state.store.jobs().await)
}

/// POST /api/v1/jobs
pub async fn handle_post_job(
    State(state): State<AppState>,
    Json(request): Json<NewJobRequest>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    let job = post_job(&state.store, request).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Job>, AppError> {
    let id = JobId(id);
    state
        .store
        .job(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))
}

/// POST /api/v1/jobs/:id/applications
///
/// Multipart form with `name`, `email` and a `resume` file part.
pub async fn handle_submit_application(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<SubmitResponse>), AppError> {
    let submission = read_submission(JobId(job_id), multipart).await?;
    let application = submit_application(&state.store, &state.scorer, submission).await?;
    let status_label = application.status.label();

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            application,
            status_label,
        }),
    ))
}

/// GET /api/v1/applications
///
/// All applications, best score first.
pub async fn handle_list_applications(State(state): State<AppState>) -> Json<Vec<Application>> {
    Json(rank_by_score(state.store.applications().await))
}

/// GET /api/v1/applications/:id
pub async fn handle_get_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Application>, AppError> {
    let id = ApplicationId(id);
    state
        .store
        .application(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))
}

/// PATCH /api/v1/applications/:id/status
///
/// Manual transition (e.g. to `hired`). Refuses statuses that contradict the score.
pub async fn handle_update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<Application>, AppError> {
    let id = ApplicationId(id);
    let application = state
        .store
        .application(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;

    if !request.status.admits_score(application.score()) {
        return Err(AppError::UnprocessableEntity(format!(
            "Status '{}' is not allowed for a score of {}",
            request.status.label(),
            application.score()
        )));
    }

    if !state.store.update_status(&id, request.status).await {
        return Err(AppError::NotFound(format!("Application {id} not found")));
    }

    state
        .store
        .application(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))
}

/// POST /api/v1/applications/:id/assessment
pub async fn handle_send_assessment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AssessmentDispatch>, AppError> {
    let dispatch = send_assessment(
        &state.store,
        &state.assessor,
        &ApplicationId(id),
        state.config.assessment_failure_policy,
    )
    .await?;
    Ok(Json(dispatch))
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart intake
// ────────────────────────────────────────────────────────────────────────────

async fn read_submission(
    job_id: JobId,
    mut multipart: Multipart,
) -> Result<CandidateSubmission, AppError> {
    let mut name = None;
    let mut email = None;
    let mut resume = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "name" => name = Some(field_text(field).await?),
            "email" => email = Some(field_text(field).await?),
            "resume" => {
                let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_RESUME_MIME_TYPE)
                    .to_string();
                let bytes: Bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read resume: {e}")))?;
                resume = Some(ResumeDocument {
                    file_name,
                    mime_type,
                    bytes,
                });
            }
            _ => {}
        }
    }

    Ok(CandidateSubmission {
        job_id,
        candidate_name: name.ok_or_else(|| missing_field("name"))?,
        candidate_email: email.ok_or_else(|| missing_field("email"))?,
        resume: resume.ok_or_else(|| missing_field("resume"))?,
    })
}

async fn field_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid form field: {e}")))
}

fn missing_field(name: &str) -> AppError {
    AppError::Validation(format!("multipart field '{name}' is required"))
}
