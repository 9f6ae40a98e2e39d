//! Essay grader: one structured-output call per essay.
//!
//! `AppState` holds an `Arc<dyn EssayGrader>`; the Gemini-backed grader is the
//! production implementation and tests swap in a stub.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::grading::prompts::{build_grading_prompt, GRADING_SYSTEM};
use crate::grading::schema::grading_response_schema;
use crate::grading::validation::{validate_result, ValidationIssue};
use crate::llm_client::{parse_json_text, LlmClient, LlmError};
use crate::models::grading::GradingResult;

#[derive(Debug, Error)]
pub enum GradingError {
    /// Network, auth, quota, non-2xx status, or an empty payload.
    #[error("grading request failed: {0}")]
    Llm(LlmError),

    /// The model answered, but not with a usable grading document.
    #[error("model returned malformed output: {0}")]
    MalformedOutput(String),
}

impl GradingError {
    pub fn code(&self) -> &'static str {
        match self {
            GradingError::Llm(_) => "LLM_ERROR",
            GradingError::MalformedOutput(_) => "MALFORMED_OUTPUT",
        }
    }
}

impl From<LlmError> for GradingError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Parse(e) => GradingError::MalformedOutput(e.to_string()),
            other => GradingError::Llm(other),
        }
    }
}

impl From<Vec<ValidationIssue>> for GradingError {
    fn from(issues: Vec<ValidationIssue>) -> Self {
        let detail = issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        GradingError::MalformedOutput(detail)
    }
}

#[async_trait]
pub trait EssayGrader: Send + Sync {
    async fn grade(
        &self,
        essay_text: &str,
        assignment_prompt: Option<&str>,
    ) -> Result<GradingResult, GradingError>;
}

/// Grades essays through Gemini with the fixed rubric and response schema.
pub struct GeminiEssayGrader {
    llm: LlmClient,
    schema: Value,
}

impl GeminiEssayGrader {
    pub fn new(llm: LlmClient) -> Self {
        Self {
            llm,
            schema: grading_response_schema(),
        }
    }
}

#[async_trait]
impl EssayGrader for GeminiEssayGrader {
    async fn grade(
        &self,
        essay_text: &str,
        assignment_prompt: Option<&str>,
    ) -> Result<GradingResult, GradingError> {
        grade_essay(essay_text, assignment_prompt, &self.llm, &self.schema).await
    }
}

/// Builds the prompt, makes exactly one model call, and returns a validated result.
pub async fn grade_essay(
    essay_text: &str,
    assignment_prompt: Option<&str>,
    llm: &LlmClient,
    schema: &Value,
) -> Result<GradingResult, GradingError> {
    let prompt = build_grading_prompt(essay_text, assignment_prompt);
    debug!(
        "Grading essay: {} chars, assignment prompt: {}",
        essay_text.len(),
        assignment_prompt.is_some()
    );

    let response = llm.call(&prompt, GRADING_SYSTEM, schema).await?;
    let text = response.text().ok_or_else(|| {
        warn!(
            "Model returned no text (finish reason: {})",
            response.finish_reason().unwrap_or("unknown")
        );
        LlmError::EmptyContent
    })?;

    interpret_response_text(&text)
}

/// Parses and validates a raw text payload from the model.
pub fn interpret_response_text(text: &str) -> Result<GradingResult, GradingError> {
    let result: GradingResult = parse_json_text(text)?;
    accept(result)
}

fn accept(result: GradingResult) -> Result<GradingResult, GradingError> {
    if let Err(issues) = validate_result(&result) {
        warn!("Rejecting grading result with {} issue(s)", issues.len());
        return Err(issues.into());
    }
    Ok(result)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grading::fixtures::{sample_result, SAMPLE_RESPONSE};

    #[test]
    fn test_interpret_valid_response() {
        let result = interpret_response_text(SAMPLE_RESPONSE).unwrap();
        assert_eq!(result, sample_result());
    }

    #[test]
    fn test_truncated_json_is_malformed() {
        let err = interpret_response_text(&SAMPLE_RESPONSE[..40]).unwrap_err();
        assert!(matches!(err, GradingError::MalformedOutput(_)));
        assert_eq!(err.code(), "MALFORMED_OUTPUT");
    }

    #[test]
    fn test_prose_is_malformed() {
        let err = interpret_response_text("Here is your grade: B+").unwrap_err();
        assert!(matches!(err, GradingError::MalformedOutput(_)));
    }

    #[test]
    fn test_missing_required_field_is_malformed() {
        let json = SAMPLE_RESPONSE.replace("\"letterGrade\":\"B+\",", "");
        let err = interpret_response_text(&json).unwrap_err();
        match err {
            GradingError::MalformedOutput(detail) => assert!(detail.contains("letterGrade")),
            other => panic!("expected malformed output, got {other:?}"),
        }
    }

    #[test]
    fn test_out_of_range_score_is_malformed() {
        let json = SAMPLE_RESPONSE.replace("\"overallScore\":85", "\"overallScore\":850");
        let err = interpret_response_text(&json).unwrap_err();
        match err {
            GradingError::MalformedOutput(detail) => {
                assert!(detail.contains("overallScore: score 850"))
            }
            other => panic!("expected malformed output, got {other:?}"),
        }
    }

    #[test]
    fn test_llm_errors_keep_their_kind() {
        let err: GradingError = LlmError::EmptyContent.into();
        assert!(matches!(err, GradingError::Llm(LlmError::EmptyContent)));
        assert_eq!(err.code(), "LLM_ERROR");

        let err: GradingError = LlmError::Api {
            status: 403,
            message: "API key not valid".to_string(),
        }
        .into();
        assert!(err.to_string().contains("API key not valid"));
    }

    #[tokio::test]
    async fn test_stub_records_calls() {
        use testing::{StubGrader, StubOutcome};

        let stub = StubGrader::new(StubOutcome::Succeed(sample_result()));
        let result = stub.grade("essay", Some("prompt")).await.unwrap();
        assert_eq!(result.overall_score, 85);
        assert_eq!(stub.calls(), 1);
        assert_eq!(
            stub.last_call(),
            Some(("essay".to_string(), Some("prompt".to_string())))
        );
    }
}
