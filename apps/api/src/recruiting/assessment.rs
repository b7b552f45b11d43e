//! HR follow-up: draft the assessment email and mark the application as sent.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::gateway::AssessmentGateway;
use crate::models::{ApplicationId, ApplicationStatus, SHORTLIST_THRESHOLD};
use crate::store::{AppStore, Transition};

/// Title used when an application points at a job that no longer resolves.
pub const UNKNOWN_ROLE_TITLE: &str = "Role";

/// What to do when the gateway returns its failure text instead of a draft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AssessmentFailurePolicy {
    /// Leave the status untouched and report the failure.
    #[default]
    Block,
    /// Mark the application as sent anyway, with the failure text as body.
    MarkSent,
}

impl FromStr for AssessmentFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "block" => Ok(Self::Block),
            "mark_sent" | "mark-sent" => Ok(Self::MarkSent),
            other => Err(format!("unknown assessment failure policy '{other}'")),
        }
    }
}

impl fmt::Display for AssessmentFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block => f.write_str("block"),
            Self::MarkSent => f.write_str("mark_sent"),
        }
    }
}

/// The email that was "sent". Delivery is simulated; the dispatch is logged and returned.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentDispatch {
    pub application_id: ApplicationId,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    /// False when `body` is the gateway's failure text.
    pub generated: bool,
}

/// Sends the assessment for a shortlisted application.
///
/// Gated here rather than in the gateway: the application must exist, carry a
/// score of at least 75 and still be `Shortlisted`. The status is re-checked
/// when the transition is applied.
pub async fn send_assessment(
    store: &AppStore,
    writer: &AssessmentGateway,
    application_id: &ApplicationId,
    policy: AssessmentFailurePolicy,
) -> Result<AssessmentDispatch, AppError> {
    let application = store
        .application(application_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Application {application_id} not found")))?;

    let analysis = application.analysis_result.as_ref().ok_or_else(|| {
        AppError::UnprocessableEntity(format!(
            "Application {application_id} has not been analyzed yet"
        ))
    })?;

    if !analysis.is_shortlistable() {
        return Err(AppError::UnprocessableEntity(format!(
            "Application {application_id} scored {} (below {SHORTLIST_THRESHOLD}); not eligible for assessment",
            analysis.score
        )));
    }

    match application.status {
        ApplicationStatus::Shortlisted => {}
        ApplicationStatus::AssessmentSent | ApplicationStatus::Hired => {
            return Err(AppError::Conflict(format!(
                "Application {application_id} is already {}",
                application.status.label()
            )));
        }
        ApplicationStatus::Pending | ApplicationStatus::AutoRejected => {
            return Err(AppError::UnprocessableEntity(format!(
                "Application {application_id} is {}; only shortlisted candidates get an assessment",
                application.status.label()
            )));
        }
    }

    let job_title = store
        .job(&application.job_id)
        .await
        .map(|job| job.title)
        .unwrap_or_else(|| UNKNOWN_ROLE_TITLE.to_string());

    let draft = writer
        .generate_assessment(&job_title, &analysis.missing_keywords)
        .await;

    if draft.fallback && policy == AssessmentFailurePolicy::Block {
        warn!("Assessment for {application_id} not sent: {}", draft.body);
        return Err(AppError::Llm(draft.body));
    }

    // The draft took a model round trip; the status may have moved meanwhile.
    match store
        .transition_status(
            application_id,
            ApplicationStatus::Shortlisted,
            ApplicationStatus::AssessmentSent,
        )
        .await
    {
        Transition::Applied => {}
        Transition::NotFound => {
            return Err(AppError::NotFound(format!(
                "Application {application_id} not found"
            )));
        }
        Transition::Stale(current) => {
            warn!("Assessment for {application_id} dropped: status is now {current:?}");
            return Err(AppError::Conflict(format!(
                "Application {application_id} changed to {} while the assessment was drafted",
                current.label()
            )));
        }
    }

    let dispatch = AssessmentDispatch {
        application_id: application.id.clone(),
        recipient: application.candidate_email.clone(),
        subject: format!("Next step for your {job_title} application"),
        body: draft.body,
        generated: !draft.fallback,
    };

    info!(
        recipient = %dispatch.recipient,
        generated = dispatch.generated,
        "ASSESSMENT EMAIL SENT for application {application_id}"
    );

    Ok(dispatch)
}
