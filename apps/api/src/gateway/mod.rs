// Gateways to the external reasoning service.
// Both gateways settle every call to a usable value: failures are logged and
// replaced by a fixed fallback, never returned to the caller.

pub mod assessment;
pub mod prompts;
pub mod scoring;

pub use assessment::AssessmentGateway;
pub use scoring::{ResumeDocument, ScoringGateway};
