use serde::{Deserialize, Serialize};

use super::config::{CategoryWeights, RiskThresholds};
use super::domain::{Category, QuestionWeight, RiskLevel, MAX_ANSWER, MAX_SCORE};

/// Contribution of one answer to its category score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDetail {
    pub position: usize,
    pub answer: i32,
    pub weight: f64,
    pub high_impact: bool,
    pub effective_weight: f64,
    pub contribution: f64,
}

/// Weighted category score on the 0-10 scale, with its working.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub category: Category,
    pub score: f64,
    pub weighted_sum: f64,
    pub total_weight: f64,
    /// Weighted mean answer, still on the 0-4 answer scale.
    pub raw_average: f64,
    pub questions: Vec<QuestionDetail>,
}

/// Composite score and the three independent classifications.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeScore {
    /// Display value, rounded to one decimal.
    pub total: f64,
    /// Value used for `risk_overall`.
    pub unrounded_total: f64,
    pub risk_stress: RiskLevel,
    pub risk_burnout: RiskLevel,
    pub risk_overall: RiskLevel,
}

pub(crate) fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Input is assumed validated: equal lengths, answers in range, positive
/// weights whose boosted sums stay finite.
pub(crate) fn score_category(
    category: Category,
    answers: &[i32],
    weights: &[QuestionWeight],
    high_impact_multiplier: f64,
) -> CategoryScore {
    let mut questions = Vec::with_capacity(answers.len());
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;

    for (index, (answer, weight)) in answers.iter().zip(weights).enumerate() {
        let boost = if weight.high_impact {
            high_impact_multiplier
        } else {
            1.0
        };
        let effective_weight = weight.weight * boost;
        let contribution = f64::from(*answer) * effective_weight;

        weighted_sum += contribution;
        total_weight += effective_weight;
        questions.push(QuestionDetail {
            position: index + 1,
            answer: *answer,
            weight: weight.weight,
            high_impact: weight.high_impact,
            effective_weight,
            contribution,
        });
    }

    let raw_average = if total_weight > 0.0 {
        weighted_sum / total_weight
    } else {
        0.0
    };
    let score = round_one_decimal(raw_average / f64::from(MAX_ANSWER) * MAX_SCORE);

    CategoryScore {
        category,
        score,
        weighted_sum,
        total_weight,
        raw_average,
        questions,
    }
}

pub(crate) fn compose_and_classify(
    adjusted_stress: f64,
    adjusted_burnout: f64,
    weights: &CategoryWeights,
    thresholds: &RiskThresholds,
) -> CompositeScore {
    let unrounded_total = (adjusted_stress * weights.stress + adjusted_burnout * weights.burnout)
        / (weights.stress + weights.burnout);

    CompositeScore {
        total: round_one_decimal(unrounded_total),
        unrounded_total,
        risk_stress: thresholds.classify(adjusted_stress),
        risk_burnout: thresholds.classify(adjusted_burnout),
        risk_overall: thresholds.classify(unrounded_total),
    }
}

/// Classifies a score against the standard BAJO/MEDIO/ALTO table.
pub fn classify(score: f64) -> RiskLevel {
    RiskThresholds::default().classify(score)
}
