//! Result dashboard: a pure view of one `GradingResult`.
//!
//! Nothing here performs I/O or touches shell state; `render` turns the view
//! into HTML.

pub mod radar;

use serde::Serialize;

use crate::dashboard::radar::RadarChart;
use crate::models::grading::{Criterion, GradingResult, StyleMetric};

/// Colour band of the overall score card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn for_score(score: i32) -> Self {
        match score {
            s if s >= 90 => ScoreBand::Excellent,
            s if s >= 80 => ScoreBand::Good,
            s if s >= 70 => ScoreBand::Fair,
            _ => ScoreBand::Poor,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "emerald",
            ScoreBand::Good => "blue",
            ScoreBand::Fair => "amber",
            ScoreBand::Poor => "red",
        }
    }
}

/// Colour band of a single criterion in the breakdown list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionBand {
    Strong,
    Developing,
    Weak,
}

impl CriterionBand {
    pub fn for_score(score: i32) -> Self {
        match score {
            s if s >= 80 => CriterionBand::Strong,
            s if s >= 60 => CriterionBand::Developing,
            _ => CriterionBand::Weak,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            CriterionBand::Strong => "green",
            CriterionBand::Developing => "amber",
            CriterionBand::Weak => "red",
        }
    }
}

/// Tier of a style rating. Unrecognised wording falls into `Weak`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingTier {
    Best,
    Second,
    Third,
    Weak,
}

const RATING_KEYWORDS: &[(RatingTier, &[&str])] = &[
    (RatingTier::Best, &["excellent", "advanced"]),
    (RatingTier::Second, &["good", "proficient"]),
    (RatingTier::Third, &["fair", "intermediate"]),
];

impl RatingTier {
    /// Case-insensitive substring match, checked best tier first.
    pub fn classify(rating: &str) -> Self {
        let rating = rating.to_lowercase();
        RATING_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| rating.contains(k)))
            .map(|(tier, _)| *tier)
            .unwrap_or(RatingTier::Weak)
    }

    pub fn color(self) -> &'static str {
        match self {
            RatingTier::Best => "emerald",
            RatingTier::Second => "blue",
            RatingTier::Third => "amber",
            RatingTier::Weak => "red",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreCard {
    pub score: i32,
    pub letter_grade: String,
    pub summary: String,
    pub band: ScoreBand,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionItem {
    pub name: String,
    pub score: i32,
    pub feedback: String,
    pub band: CriterionBand,
}

impl From<&Criterion> for CriterionItem {
    fn from(c: &Criterion) -> Self {
        Self {
            name: c.name.clone(),
            score: c.score,
            feedback: c.feedback.clone(),
            band: CriterionBand::for_score(c.score),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleCard {
    pub category: String,
    pub rating: String,
    pub feedback: String,
    pub tier: RatingTier,
}

impl From<&StyleMetric> for StyleCard {
    fn from(m: &StyleMetric) -> Self {
        Self {
            category: m.category.clone(),
            rating: m.rating.clone(),
            feedback: m.feedback.clone(),
            tier: RatingTier::classify(&m.rating),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StylePanel {
    pub tone: String,
    pub metrics: Vec<StyleCard>,
    pub suggestions: Vec<String>,
}

/// Everything the results page shows, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub score_card: ScoreCard,
    pub radar: RadarChart,
    pub criteria: Vec<CriterionItem>,
    pub style: StylePanel,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

impl DashboardView {
    pub fn build(result: &GradingResult) -> Self {
        let style = &result.style_analysis;

        Self {
            score_card: ScoreCard {
                score: result.overall_score,
                letter_grade: result.letter_grade.clone(),
                summary: result.summary.clone(),
                band: ScoreBand::for_score(result.overall_score),
            },
            radar: RadarChart::from_criteria(&result.criteria),
            criteria: result.criteria.iter().map(CriterionItem::from).collect(),
            style: StylePanel {
                tone: style.tone.clone(),
                metrics: style.metrics.iter().map(StyleCard::from).collect(),
                suggestions: style.suggestions.clone(),
            },
            strengths: result.strengths.clone(),
            improvements: result.improvements.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grading::fixtures::sample_result;
    use crate::models::grading::StyleAnalysis;

    #[test]
    fn test_score_band_thresholds() {
        assert_eq!(ScoreBand::for_score(100), ScoreBand::Excellent);
        assert_eq!(ScoreBand::for_score(90), ScoreBand::Excellent);
        assert_eq!(ScoreBand::for_score(89), ScoreBand::Good);
        assert_eq!(ScoreBand::for_score(80), ScoreBand::Good);
        assert_eq!(ScoreBand::for_score(79), ScoreBand::Fair);
        assert_eq!(ScoreBand::for_score(70), ScoreBand::Fair);
        assert_eq!(ScoreBand::for_score(69), ScoreBand::Poor);
        assert_eq!(ScoreBand::for_score(0), ScoreBand::Poor);
    }

    #[test]
    fn test_criterion_band_thresholds() {
        assert_eq!(CriterionBand::for_score(80), CriterionBand::Strong);
        assert_eq!(CriterionBand::for_score(79), CriterionBand::Developing);
        assert_eq!(CriterionBand::for_score(60), CriterionBand::Developing);
        assert_eq!(CriterionBand::for_score(59), CriterionBand::Weak);
    }

    #[test]
    fn test_rating_tier_keywords() {
        assert_eq!(RatingTier::classify("Excellent"), RatingTier::Best);
        assert_eq!(RatingTier::classify("ADVANCED"), RatingTier::Best);
        assert_eq!(RatingTier::classify("Good"), RatingTier::Second);
        assert_eq!(RatingTier::classify("proficient"), RatingTier::Second);
        assert_eq!(RatingTier::classify("Fair"), RatingTier::Third);
        assert_eq!(RatingTier::classify("Intermediate"), RatingTier::Third);
        assert_eq!(RatingTier::classify("Poor"), RatingTier::Weak);
    }

    #[test]
    fn test_rating_tier_substring_and_fallback() {
        assert_eq!(RatingTier::classify("Very Good"), RatingTier::Second);
        assert_eq!(RatingTier::classify("Good to Excellent"), RatingTier::Best);
        assert_eq!(RatingTier::classify("Needs work"), RatingTier::Weak);
        assert_eq!(RatingTier::classify(""), RatingTier::Weak);
    }

    #[test]
    fn test_sample_response_bands() {
        let view = DashboardView::build(&sample_result());

        assert_eq!(view.score_card.band, ScoreBand::Good);
        assert_eq!(view.score_card.band.color(), "blue");
        assert_eq!(view.score_card.letter_grade, "B+");

        assert_eq!(view.criteria.len(), 1);
        assert_eq!(view.criteria[0].band, CriterionBand::Developing);
        assert_eq!(view.criteria[0].band.color(), "amber");

        let style = view.style;
        assert_eq!(style.tone, "Formal");
        assert_eq!(style.metrics[0].tier, RatingTier::Second);
        assert_eq!(style.suggestions, vec!["Vary sentence length"]);

        assert_eq!(view.strengths, vec!["Clear intro"]);
        assert_eq!(view.improvements, vec!["Weak conclusion"]);
    }

    #[test]
    fn test_radar_has_one_axis_per_criterion() {
        let view = DashboardView::build(&sample_result());
        assert_eq!(view.radar.axes.len(), 1);
        assert_eq!(view.radar.axes[0].subject, "Structure");
        assert_eq!(view.radar.axes[0].value, 70);
    }

    #[test]
    fn test_sparse_style_analysis_keeps_suggestions() {
        let mut result = sample_result();
        result.style_analysis = StyleAnalysis {
            tone: String::new(),
            metrics: vec![],
            suggestions: vec!["orphan".to_string()],
        };
        let style = DashboardView::build(&result).style;
        assert!(style.metrics.is_empty());
        assert_eq!(style.suggestions, vec!["orphan"]);
    }
}
