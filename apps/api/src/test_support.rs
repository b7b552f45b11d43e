//! Shared fixtures for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;

use crate::config::Config;
use crate::gateway::{AssessmentGateway, ResumeDocument, ScoringGateway};
use crate::llm_client::{GenerateRequest, GenerativeModel, LlmError};
use crate::models::{
    AnalysisResult, Application, ApplicationId, ApplicationStatus, EmploymentType, Job, JobId,
};
use crate::recruiting::AssessmentFailurePolicy;
use crate::state::AppState;
use crate::store::{AppStore, MemoryStore};

/// Scripted model: pops one canned reply per call and records every request.
/// When the script runs dry, calls fail with `EmptyContent`.
#[derive(Default)]
pub struct StubModel {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl StubModel {
    pub fn replying(reply: impl Into<String>) -> Arc<Self> {
        let stub = Self::default();
        stub.push(Ok(reply.into()));
        Arc::new(stub)
    }

    pub fn failing(error: LlmError) -> Arc<Self> {
        let stub = Self::default();
        stub.push(Err(error));
        Arc::new(stub)
    }

    pub fn push(&self, reply: Result<String, LlmError>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeModel for StubModel {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}

pub fn analysis_json(score: f64, missing: &[&str]) -> String {
    serde_json::json!({
        "score": score,
        "missingKeywords": missing,
        "strengths": ["Clear communication"],
        "summary": "Relevant background. Some gaps remain."
    })
    .to_string()
}

pub fn job(id: &str, title: &str) -> Job {
    Job {
        id: JobId(id.to_string()),
        title: title.to_string(),
        department: "Engineering".to_string(),
        location: "Remote".to_string(),
        employment_type: EmploymentType::FullTime,
        description: format!("{title} building services."),
        requirements: "Rust, Tokio, PostgreSQL".to_string(),
        posted_date: Utc::now(),
    }
}

pub fn application(id: &str, job_id: &str, score: f64) -> Application {
    Application {
        id: ApplicationId(id.to_string()),
        job_id: JobId(job_id.to_string()),
        candidate_name: "Grace Hopper".to_string(),
        candidate_email: "grace@example.com".to_string(),
        resume_file_name: "grace.pdf".to_string(),
        applied_date: Utc::now(),
        analysis_result: Some(AnalysisResult {
            score,
            missing_keywords: vec!["Kubernetes".to_string(), "Kafka".to_string()],
            strengths: vec!["Compilers".to_string()],
            summary: "Solid systems background. Light on infrastructure.".to_string(),
        }),
        status: ApplicationStatus::from_score(score),
    }
}

pub fn resume() -> ResumeDocument {
    ResumeDocument {
        file_name: "resume.pdf".to_string(),
        mime_type: "application/pdf".to_string(),
        bytes: Bytes::from_static(b"%PDF-1.7 fake resume"),
    }
}

pub fn empty_store() -> (AppStore, Arc<MemoryStore>) {
    let kv = Arc::new(MemoryStore::default());
    (AppStore::load(kv.clone(), false), kv)
}

/// Router state wired to a stub model and an in-memory store.
pub fn app_state(model: Arc<StubModel>) -> (AppState, Arc<MemoryStore>) {
    let (store, kv) = empty_store();
    let config = Config {
        gemini_api_key: "test-key".to_string(),
        port: 0,
        rust_log: "debug".to_string(),
        data_dir: std::env::temp_dir(),
        llm_timeout: Duration::from_secs(5),
        assessment_failure_policy: AssessmentFailurePolicy::Block,
        seed_demo_jobs: false,
    };
    let state = AppState {
        store,
        scorer: Arc::new(ScoringGateway::new(model.clone())),
        assessor: Arc::new(AssessmentGateway::new(model)),
        config,
    };
    (state, kv)
}
