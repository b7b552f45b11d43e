//! HR job posting and the ranked review list.

use std::cmp::Ordering;

use chrono::Utc;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{Application, EmploymentType, Job, JobId};
use crate::store::AppStore;

const DEFAULT_DEPARTMENT: &str = "General";
const DEFAULT_LOCATION: &str = "Remote";

/// HR "post job" form. Only title, description and requirements are required.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJobRequest {
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub department: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub employment_type: Option<EmploymentType>,
}

pub async fn post_job(store: &AppStore, request: NewJobRequest) -> Result<Job, AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }

    let job = Job {
        id: JobId::generate(),
        title: request.title.trim().to_string(),
        department: non_blank_or(request.department, DEFAULT_DEPARTMENT),
        location: non_blank_or(request.location, DEFAULT_LOCATION),
        employment_type: request.employment_type.unwrap_or_default(),
        description: request.description,
        requirements: request.requirements,
        posted_date: Utc::now(),
    };

    store.add_job(job.clone()).await;
    Ok(job)
}

fn non_blank_or(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Highest score first. Ties keep their newest-first order.
pub fn rank_by_score(mut applications: Vec<Application>) -> Vec<Application> {
    applications.sort_by(|a, b| b.score().partial_cmp(&a.score()).unwrap_or(Ordering::Equal));
    applications
}
