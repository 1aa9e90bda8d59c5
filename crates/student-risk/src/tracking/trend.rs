use serde::{Deserialize, Serialize};

use super::domain::{EvaluationId, EvaluationRecord};
use crate::assessment::RiskLevel;

/// Total-score changes within this band count as stable.
pub const STABILITY_BAND: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Stable,
    Worsening,
}

/// Change between two stored evaluations of the same student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub previous: EvaluationId,
    pub current: EvaluationId,
    pub stress_delta: f64,
    pub burnout_delta: f64,
    pub total_delta: f64,
    pub direction: TrendDirection,
    pub previous_risk: RiskLevel,
    pub current_risk: RiskLevel,
    /// Overall risk moved to a higher band.
    pub escalated: bool,
}

pub fn compare(previous: &EvaluationRecord, current: &EvaluationRecord) -> TrendReport {
    let before = &previous.outcome.scores;
    let after = &current.outcome.scores;
    let delta = |from: f64, to: f64| ((to - from) * 10.0).round() / 10.0;

    let total_delta = delta(before.total, after.total);
    let direction = if total_delta > STABILITY_BAND {
        TrendDirection::Worsening
    } else if total_delta < -STABILITY_BAND {
        TrendDirection::Improving
    } else {
        TrendDirection::Stable
    };

    TrendReport {
        previous: previous.id.clone(),
        current: current.id.clone(),
        stress_delta: delta(before.stress, after.stress),
        burnout_delta: delta(before.burnout, after.burnout),
        total_delta,
        direction,
        previous_risk: previous.overall_risk(),
        current_risk: current.overall_risk(),
        escalated: current.overall_risk() > previous.overall_risk(),
    }
}
