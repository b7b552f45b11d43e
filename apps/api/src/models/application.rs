use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::job::JobId;

/// Minimum ATS score (inclusive) for a candidate to be shortlisted.
pub const SHORTLIST_THRESHOLD: f64 = 75.0;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Structured ATS verdict for one resume against one job.
///
/// This is also the exact wire shape the scoring model must return: all four
/// fields are required and anything extra is a protocol error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AnalysisResult {
    pub score: f64, // 0 – 100
    pub missing_keywords: Vec<String>,
    pub strengths: Vec<String>,
    pub summary: String,
}

impl AnalysisResult {
    pub const FALLBACK_KEYWORD: &'static str = "Error analyzing resume";
    pub const FALLBACK_SUMMARY: &'static str = "Failed to analyze resume due to API error.";

    /// Degraded result substituted whenever the scoring call fails.
    pub fn fallback() -> Self {
        Self {
            score: 0.0,
            missing_keywords: vec![Self::FALLBACK_KEYWORD.to_string()],
            strengths: vec![],
            summary: Self::FALLBACK_SUMMARY.to_string(),
        }
    }

    pub fn is_shortlistable(&self) -> bool {
        self.score >= SHORTLIST_THRESHOLD
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Shortlisted,
    AutoRejected,
    AssessmentSent,
    Hired,
}

impl ApplicationStatus {
    /// Initial status assigned from an ATS score. The boundary is inclusive.
    pub fn from_score(score: f64) -> Self {
        if score >= SHORTLIST_THRESHOLD {
            ApplicationStatus::Shortlisted
        } else {
            ApplicationStatus::AutoRejected
        }
    }

    /// Whether an application with `score` may carry this status.
    pub fn admits_score(self, score: f64) -> bool {
        match self {
            ApplicationStatus::Pending => true,
            ApplicationStatus::AutoRejected => score < SHORTLIST_THRESHOLD,
            ApplicationStatus::Shortlisted
            | ApplicationStatus::AssessmentSent
            | ApplicationStatus::Hired => score >= SHORTLIST_THRESHOLD,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending Analysis",
            ApplicationStatus::Shortlisted => "Shortlisted",
            ApplicationStatus::AutoRejected => "Auto-Rejected (Low Score)",
            ApplicationStatus::AssessmentSent => "Assessment Sent",
            ApplicationStatus::Hired => "Hired",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    /// Weak reference: the job may not exist if the record was hand-edited.
    pub job_id: JobId,
    pub candidate_name: String,
    pub candidate_email: String,
    /// Display only. The resume bytes are dropped once scored.
    pub resume_file_name: String,
    pub applied_date: DateTime<Utc>,
    #[serde(default, alias = "atsData", skip_serializing_if = "Option::is_none")]
    pub analysis_result: Option<AnalysisResult>,
    pub status: ApplicationStatus,
}

impl Application {
    /// Score used for ranking; an application without a result ranks as 0.
    pub fn score(&self) -> f64 {
        self.analysis_result.as_ref().map(|a| a.score).unwrap_or(0.0)
    }
}
