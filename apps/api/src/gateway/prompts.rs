// Gateway LLM prompt templates.

use serde_json::{json, Value};

/// Resume scoring prompt. Replace `{job_description}` and `{job_requirements}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Your task is to evaluate the candidate's attached resume against the specific job description and requirements provided below.

JOB DESCRIPTION:
{job_description}

JOB REQUIREMENTS:
{job_requirements}

Analyze the resume content strictly.
1. Assign a score from 0 to 100 based on keyword matching, experience relevance, and skills.
2. Identify key missing skills or keywords that are present in the requirements but missing in the resume.
3. Identify the top strengths of the candidate.
4. Provide a brief 2-sentence summary of the candidate's fit."#;

/// Assessment email prompt. Replace `{job_title}` and `{missing_keywords}` before sending.
pub const ASSESSMENT_PROMPT_TEMPLATE: &str = r#"Generate a short technical assessment email for a candidate applying for the position of {job_title}.
The candidate was missing the following keywords: {missing_keywords}.

The email should be professional, inviting them to a coding challenge or quiz specifically targeting these missing areas to verify their knowledge.
Keep it under 100 words."#;

/// Fills `{name}` placeholders in one pass over `template`. Substituted values
/// are never scanned again, so a field may contain placeholder text verbatim.
pub fn render_prompt(template: &str, fields: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let hit = fields.iter().find_map(|&(name, value)| {
            tail.strip_prefix(name)
                .and_then(|after| after.strip_prefix('}'))
                .map(|after| (value, after))
        });
        match hit {
            Some((value, after)) => {
                out.push_str(value);
                rest = after;
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Response schema forcing the model to emit an `AnalysisResult`.
pub fn analysis_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "score": { "type": "NUMBER", "description": "Score from 0 to 100" },
            "missingKeywords": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "List of important keywords missing from resume"
            },
            "strengths": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "List of candidate strengths"
            },
            "summary": { "type": "STRING", "description": "Brief summary of fit" }
        },
        "required": ["score", "missingKeywords", "strengths", "summary"]
    })
}
