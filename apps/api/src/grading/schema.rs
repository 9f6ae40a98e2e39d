//! Structured-output schema sent with every grading request.
//!
//! Gemini enforces this server-side; `validation` re-checks what the schema
//! cannot express (score ranges, blank grades).

use serde_json::{json, Value};

/// Closed vocabulary for style ratings. The dashboard still tiers free text
/// for responses that ignore the enum.
pub const STYLE_RATINGS: [&str; 4] = ["Excellent", "Good", "Fair", "Poor"];

/// Top-level fields every response must carry.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "overallScore",
    "letterGrade",
    "summary",
    "criteria",
    "styleAnalysis",
    "strengths",
    "improvements",
];

pub fn grading_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "overallScore": { "type": "INTEGER", "description": "Score out of 100" },
            "letterGrade": {
                "type": "STRING",
                "description": "University letter grade (A, A-, B+, etc.)"
            },
            "summary": {
                "type": "STRING",
                "description": "A paragraph summarizing the overall impression."
            },
            "criteria": {
                "type": "ARRAY",
                "description": "Breakdown of scores by category",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": {
                            "type": "STRING",
                            "description": "e.g., 'Argument & Thesis', 'Structure'"
                        },
                        "score": {
                            "type": "INTEGER",
                            "description": "Score out of 100 for this specific criterion"
                        },
                        "feedback": {
                            "type": "STRING",
                            "description": "Specific feedback for this criterion"
                        }
                    },
                    "required": ["name", "score", "feedback"]
                }
            },
            "styleAnalysis": {
                "type": "OBJECT",
                "description": "Detailed analysis of writing style and tone",
                "properties": {
                    "tone": {
                        "type": "STRING",
                        "description": "One or two words describing the overall tone (e.g., 'Formal & Academic', 'Casual', 'Persuasive')"
                    },
                    "metrics": {
                        "type": "ARRAY",
                        "description": "Assessments of specific style factors",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "category": {
                                    "type": "STRING",
                                    "description": "e.g., 'Sentence Variety', 'Word Choice', 'Formality', 'Clarity'"
                                },
                                "rating": {
                                    "type": "STRING",
                                    "format": "enum",
                                    "enum": STYLE_RATINGS,
                                    "description": "Qualitative rating"
                                },
                                "feedback": {
                                    "type": "STRING",
                                    "description": "Specific analysis for this category"
                                }
                            },
                            "required": ["category", "rating", "feedback"]
                        }
                    },
                    "suggestions": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "description": "Specific tips to improve style and tone"
                    }
                },
                "required": ["tone", "metrics", "suggestions"]
            },
            "strengths": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "List of 3-5 specific strengths"
            },
            "improvements": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "List of 3-5 specific actionable improvements"
            }
        },
        "required": REQUIRED_FIELDS
    })
}
