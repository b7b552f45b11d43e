//! Scoring Gateway — asks the model to grade a resume against a job's requirements.
//!
//! The gateway never fails: transport errors, timeouts, empty answers and answers
//! that do not match the `AnalysisResult` shape are all logged and replaced by
//! `AnalysisResult::fallback()`.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{error, info};

use crate::gateway::prompts::{
    analysis_response_schema, render_prompt, ANALYSIS_PROMPT_TEMPLATE,
};
use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, RECRUITER_PERSONA};
use crate::llm_client::{
    strip_json_fences, GenerateRequest, GenerativeModel, InlineDocument, LlmError,
};
use crate::models::AnalysisResult;

pub const DEFAULT_RESUME_MIME_TYPE: &str = "application/pdf";

/// An uploaded resume. The bytes are opaque to SmartHire and are only forwarded
/// to the model; nothing retains them after scoring.
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

pub struct ScoringGateway {
    model: Arc<dyn GenerativeModel>,
}

impl ScoringGateway {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Scores `resume` against the job. Always returns a usable result.
    pub async fn analyze_resume(
        &self,
        job_description: &str,
        job_requirements: &str,
        resume: &ResumeDocument,
    ) -> AnalysisResult {
        match self
            .try_analyze(job_description, job_requirements, resume)
            .await
        {
            Ok(result) => {
                info!(
                    score = result.score,
                    missing = result.missing_keywords.len(),
                    "Resume '{}' analyzed",
                    resume.file_name
                );
                result
            }
            Err(e) => {
                error!("Error analyzing resume '{}': {e}", resume.file_name);
                AnalysisResult::fallback()
            }
        }
    }

    async fn try_analyze(
        &self,
        job_description: &str,
        job_requirements: &str,
        resume: &ResumeDocument,
    ) -> Result<AnalysisResult, LlmError> {
        let request = build_request(job_description, job_requirements, resume);
        let text = self.model.generate(&request).await?;
        parse_analysis(&text)
    }
}

fn build_request(
    job_description: &str,
    job_requirements: &str,
    resume: &ResumeDocument,
) -> GenerateRequest {
    let task = render_prompt(
        ANALYSIS_PROMPT_TEMPLATE,
        &[
            ("job_description", job_description),
            ("job_requirements", job_requirements),
        ],
    );
    let mime_type = if resume.mime_type.trim().is_empty() {
        DEFAULT_RESUME_MIME_TYPE.to_string()
    } else {
        resume.mime_type.clone()
    };

    GenerateRequest {
        prompt: format!("{RECRUITER_PERSONA}\n\n{task}\n\n{JSON_ONLY_INSTRUCTION}"),
        document: Some(InlineDocument {
            mime_type,
            data: resume.bytes.clone(),
        }),
        response_schema: Some(analysis_response_schema()),
    }
}

/// Parses the model's answer. Shape violations and out-of-range scores are
/// protocol errors.
fn parse_analysis(text: &str) -> Result<AnalysisResult, LlmError> {
    let result: AnalysisResult = serde_json::from_str(strip_json_fences(text))?;
    if !result.score.is_finite() || !(0.0..=100.0).contains(&result.score) {
        return Err(LlmError::Schema(format!(
            "score {} is outside 0–100",
            result.score
        )));
    }
    Ok(result)
}
