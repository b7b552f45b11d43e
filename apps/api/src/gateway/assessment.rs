//! Assessment Gateway — drafts the follow-up assessment email for a candidate.

use std::sync::Arc;

use tracing::{error, warn};

use crate::gateway::prompts::{render_prompt, ASSESSMENT_PROMPT_TEMPLATE};
use crate::llm_client::{GenerateRequest, GenerativeModel};

pub const EMPTY_DRAFT_MESSAGE: &str = "Draft assessment could not be generated.";
pub const FAILED_DRAFT_MESSAGE: &str = "Error generating assessment.";

/// Email body produced by the gateway. `fallback` is set when `body` is one of
/// the fixed failure strings rather than model output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentDraft {
    pub body: String,
    pub fallback: bool,
}

impl AssessmentDraft {
    fn generated(body: String) -> Self {
        Self {
            body,
            fallback: false,
        }
    }

    fn failed(message: &str) -> Self {
        Self {
            body: message.to_string(),
            fallback: true,
        }
    }
}

pub struct AssessmentGateway {
    model: Arc<dyn GenerativeModel>,
}

impl AssessmentGateway {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Drafts the email. Performs no eligibility check of its own.
    pub async fn generate_assessment(
        &self,
        job_title: &str,
        missing_keywords: &[String],
    ) -> AssessmentDraft {
        let keywords = missing_keywords.join(", ");
        let prompt = render_prompt(
            ASSESSMENT_PROMPT_TEMPLATE,
            &[("job_title", job_title), ("missing_keywords", keywords.as_str())],
        );

        match self.model.generate(&GenerateRequest::text(prompt)).await {
            Ok(text) if !text.trim().is_empty() => AssessmentDraft::generated(text.trim().to_string()),
            Ok(_) => {
                warn!("Assessment draft for '{job_title}' came back empty");
                AssessmentDraft::failed(EMPTY_DRAFT_MESSAGE)
            }
            Err(e) => {
                error!("Error generating assessment for '{job_title}': {e}");
                AssessmentDraft::failed(FAILED_DRAFT_MESSAGE)
            }
        }
    }
}
