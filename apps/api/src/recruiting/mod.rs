// Recruiting workflow: candidate intake and HR follow-up.
// All model calls go through the gateways — no direct llm_client use here.

pub mod assessment;
pub mod handlers;
pub mod jobs;
pub mod submit;

pub use assessment::AssessmentFailurePolicy;
