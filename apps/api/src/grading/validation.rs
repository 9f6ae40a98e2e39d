//! Post-parse checks on a model response.
//!
//! The structured-output constraint guarantees shape, not ranges. A result that
//! fails any check is rejected whole; callers never see a partially valid grade.

use serde::Serialize;

use crate::models::grading::GradingResult;

const SCORE_MIN: i32 = 0;
const SCORE_MAX: i32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub field: String,
    pub reason: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Checks score ranges and the letter grade. Returns every issue found.
pub fn validate_result(result: &GradingResult) -> Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    if !in_range(result.overall_score) {
        issues.push(out_of_range("overallScore", result.overall_score));
    }

    if result.letter_grade.trim().is_empty() {
        issues.push(ValidationIssue {
            field: "letterGrade".to_string(),
            reason: "letter grade is blank".to_string(),
        });
    }

    for (idx, criterion) in result.criteria.iter().enumerate() {
        if !in_range(criterion.score) {
            issues.push(out_of_range(&format!("criteria[{idx}].score"), criterion.score));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

fn in_range(score: i32) -> bool {
    (SCORE_MIN..=SCORE_MAX).contains(&score)
}

fn out_of_range(field: &str, score: i32) -> ValidationIssue {
    ValidationIssue {
        field: field.to_string(),
        reason: format!("score {score} is outside {SCORE_MIN}..={SCORE_MAX}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grading::fixtures::sample_result;
    use crate::models::grading::Criterion;

    #[test]
    fn test_sample_result_passes() {
        assert!(validate_result(&sample_result()).is_ok());
    }

    #[test]
    fn test_boundary_scores_pass() {
        let mut result = sample_result();
        result.overall_score = 100;
        result.criteria[0].score = 0;
        assert!(validate_result(&result).is_ok());
    }

    #[test]
    fn test_overall_score_above_range_fails() {
        let mut result = sample_result();
        result.overall_score = 101;
        let issues = validate_result(&result).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "overallScore");
        assert!(issues[0].reason.contains("101"));
    }

    #[test]
    fn test_blank_letter_grade_fails() {
        let mut result = sample_result();
        result.letter_grade = "  ".to_string();
        let issues = validate_result(&result).unwrap_err();
        assert_eq!(issues[0].field, "letterGrade");
    }

    #[test]
    fn test_collects_every_issue() {
        let mut result = sample_result();
        result.overall_score = -5;
        result.criteria.push(Criterion {
            name: "Evidence".to_string(),
            score: 140,
            feedback: "Too generous".to_string(),
        });
        let issues = validate_result(&result).unwrap_err();
        let fields: Vec<_> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["overallScore", "criteria[1].score"]);
    }

    #[test]
    fn test_issue_display() {
        let issue = out_of_range("overallScore", 120);
        assert_eq!(issue.to_string(), "overallScore: score 120 is outside 0..=100");
    }
}
