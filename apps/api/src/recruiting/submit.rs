//! Candidate submission: score the resume, derive the status, store the application.

use chrono::Utc;
use tracing::info;

use crate::errors::AppError;
use crate::gateway::{ResumeDocument, ScoringGateway};
use crate::models::{Application, ApplicationId, ApplicationStatus, JobId};
use crate::store::AppStore;

#[derive(Debug, Clone)]
pub struct CandidateSubmission {
    pub job_id: JobId,
    pub candidate_name: String,
    pub candidate_email: String,
    pub resume: ResumeDocument,
}

/// Runs the full intake for one candidate.
///
/// The store is untouched until scoring settles. A scoring failure still produces
/// a stored application (auto-rejected with the fallback analysis).
pub async fn submit_application(
    store: &AppStore,
    scorer: &ScoringGateway,
    submission: CandidateSubmission,
) -> Result<Application, AppError> {
    if submission.candidate_name.trim().is_empty() {
        return Err(AppError::Validation("candidate name cannot be empty".to_string()));
    }
    if submission.candidate_email.trim().is_empty() {
        return Err(AppError::Validation("candidate email cannot be empty".to_string()));
    }
    if submission.resume.bytes.is_empty() {
        return Err(AppError::Validation("resume file cannot be empty".to_string()));
    }

    let job = store
        .job(&submission.job_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Job {} not found", submission.job_id)))?;

    let analysis = scorer
        .analyze_resume(&job.description, &job.requirements, &submission.resume)
        .await;
    let status = ApplicationStatus::from_score(analysis.score);

    let application = Application {
        id: ApplicationId::generate(),
        job_id: job.id.clone(),
        candidate_name: submission.candidate_name.trim().to_string(),
        candidate_email: submission.candidate_email.trim().to_string(),
        resume_file_name: submission.resume.file_name,
        applied_date: Utc::now(),
        analysis_result: Some(analysis),
        status,
    };

    info!(
        "Candidate applied to '{}': score {} -> {}",
        job.title,
        application.score(),
        status.label()
    );

    store.add_application(application.clone()).await;
    Ok(application)
}
