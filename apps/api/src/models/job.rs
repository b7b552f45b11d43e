use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque job identifier. Freshly minted ids are UUID v4 strings, but any
/// string read back from storage is accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    #[default]
    #[serde(alias = "Full-time")]
    FullTime,
    #[serde(alias = "Part-time")]
    PartTime,
    #[serde(alias = "Contract")]
    Contract,
}

/// A job posting. Jobs are append-only: never edited, never removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub department: String,
    pub location: String,
    #[serde(rename = "type")]
    pub employment_type: EmploymentType,
    pub description: String,
    pub requirements: String,
    pub posted_date: DateTime<Utc>,
}

/// Postings used to populate an empty board on first start.
pub fn demo_jobs(posted_date: DateTime<Utc>) -> Vec<Job> {
    vec![
        Job {
            id: JobId("1".to_string()),
            title: "Senior React Engineer".to_string(),
            department: "Engineering".to_string(),
            location: "Remote".to_string(),
            employment_type: EmploymentType::FullTime,
            description: "We are looking for a Senior React Engineer to lead our frontend \
                initiatives. You will be responsible for architecting scalable UI components."
                .to_string(),
            requirements: "5+ years of React, TypeScript, Tailwind CSS, State Management \
                (Redux/Zustand), Performance Optimization."
                .to_string(),
            posted_date,
        },
        Job {
            id: JobId("2".to_string()),
            title: "Product Manager".to_string(),
            department: "Product".to_string(),
            location: "New York, NY".to_string(),
            employment_type: EmploymentType::FullTime,
            description: "Join our product team to drive the roadmap for our SaaS platform. \
                You will work closely with engineering and design."
                .to_string(),
            requirements: "Experience with Agile, User Research, Roadmap planning, Jira, Linear, \
                Strong communication skills."
                .to_string(),
            posted_date,
        },
    ]
}
