pub mod application;
pub mod job;

pub use application::{
    AnalysisResult, Application, ApplicationId, ApplicationStatus, SHORTLIST_THRESHOLD,
};
pub use job::{demo_jobs, EmploymentType, Job, JobId};
