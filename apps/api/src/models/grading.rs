use serde::{Deserialize, Serialize};

/// One rubric dimension with its own 0–100 score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub name: String,
    pub score: i32,
    pub feedback: String,
}

/// One stylistic dimension with a qualitative rating ("Excellent", "Good", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleMetric {
    pub category: String,
    pub rating: String,
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleAnalysis {
    pub tone: String,
    pub metrics: Vec<StyleMetric>,
    pub suggestions: Vec<String>,
}

/// Full evaluation of one essay, built atomically from a single model response.
///
/// Field names on the wire are camelCase and match the response schema sent to
/// the model, so serialising a result reproduces the document it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingResult {
    pub overall_score: i32,
    pub letter_grade: String,
    pub summary: String,
    pub criteria: Vec<Criterion>,
    pub style_analysis: StyleAnalysis,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}
