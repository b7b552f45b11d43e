// Shared prompt fragments.
// Each gateway that needs LLM calls defines its own prompts alongside it.

/// Persona shared by every recruiting prompt.
pub const RECRUITER_PERSONA: &str =
    "You are an expert Application Tracking System (ATS) and HR Recruiter.";

/// Appended to prompts whose answer is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "Return the result strictly as JSON. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";
