use chrono::{DateTime, Datelike, IsoWeek, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::assessment::{EvaluationOutcome, RiskLevel, StudentProfile};

/// Identifier of a student as known to the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StudentId(pub String);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EvaluationId(pub String);

impl fmt::Display for EvaluationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Append-only record of one submission and the engine's verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub id: EvaluationId,
    pub student_id: StudentId,
    pub submitted_at: DateTime<Utc>,
    pub profile: StudentProfile,
    pub outcome: EvaluationOutcome,
}

impl EvaluationRecord {
    pub fn overall_risk(&self) -> RiskLevel {
        self.outcome.risk_levels.overall
    }

    pub fn iso_week(&self) -> IsoWeek {
        self.submitted_at.iso_week()
    }

    pub fn summary_view(&self) -> EvaluationSummaryView {
        EvaluationSummaryView {
            evaluation_id: self.id.clone(),
            student_id: self.student_id.clone(),
            submitted_at: self.submitted_at,
            overall_risk: self.overall_risk(),
            total_score: self.outcome.scores.total,
            alert: self
                .outcome
                .alert_decision
                .needed
                .then(|| self.outcome.alert_decision.summary()),
        }
    }
}

/// Compact view for coordinator listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationSummaryView {
    pub evaluation_id: EvaluationId,
    pub student_id: StudentId,
    pub submitted_at: DateTime<Utc>,
    pub overall_risk: RiskLevel,
    pub total_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
}
