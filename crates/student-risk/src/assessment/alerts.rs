use serde::{Deserialize, Serialize};

use super::config::{CategoryWeights, RiskThresholds};
use super::domain::{Category, RiskLevel};

/// Precedence level of an alert; a lower tier is only consulted when every
/// higher tier stayed silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertTier {
    IndividualHigh,
    IndividualModerate,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    StressHigh,
    BurnoutHigh,
    StressModerate,
    BurnoutModerate,
    GeneralRisk,
}

impl AlertKind {
    pub fn tier(&self) -> AlertTier {
        match self {
            AlertKind::StressHigh | AlertKind::BurnoutHigh => AlertTier::IndividualHigh,
            AlertKind::StressModerate | AlertKind::BurnoutModerate => {
                AlertTier::IndividualModerate
            }
            AlertKind::GeneralRisk => AlertTier::General,
        }
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            AlertKind::StressHigh | AlertKind::StressModerate => Some(Category::Stress),
            AlertKind::BurnoutHigh | AlertKind::BurnoutModerate => Some(Category::Burnout),
            AlertKind::GeneralRisk => None,
        }
    }

    pub fn severity(&self) -> RiskLevel {
        match self.tier() {
            AlertTier::IndividualModerate => RiskLevel::Medio,
            AlertTier::IndividualHigh | AlertTier::General => RiskLevel::Alto,
        }
    }

    pub fn requires_intervention(&self) -> bool {
        self.severity() == RiskLevel::Alto
    }

    fn title(&self) -> &'static str {
        match self {
            AlertKind::StressHigh => "High stress level",
            AlertKind::BurnoutHigh => "High burnout level",
            AlertKind::StressModerate => "Moderate stress level",
            AlertKind::BurnoutModerate => "Moderate burnout level",
            AlertKind::GeneralRisk => "High combined psychosocial risk",
        }
    }

    fn message(&self, score: f64) -> String {
        match self {
            AlertKind::StressHigh => format!(
                "Stress score {score:.1}/10 is in the ALTO band; professional follow-up is required"
            ),
            AlertKind::BurnoutHigh => format!(
                "Burnout score {score:.1}/10 is in the ALTO band; professional follow-up is required"
            ),
            AlertKind::StressModerate => {
                format!("Stress score {score:.1}/10 is in the MEDIO band; monitor the student")
            }
            AlertKind::BurnoutModerate => {
                format!("Burnout score {score:.1}/10 is in the MEDIO band; monitor the student")
            }
            AlertKind::GeneralRisk => format!(
                "Composite score {score:.1}/10 is in the ALTO band although no single category is; professional follow-up is required"
            ),
        }
    }
}

/// A single notice for the alerting collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub kind: AlertKind,
    pub severity: RiskLevel,
    pub intervention_required: bool,
    pub title: String,
    pub message: String,
    pub score: f64,
}

impl Alert {
    fn new(kind: AlertKind, score: f64) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            intervention_required: kind.requires_intervention(),
            title: kind.title().to_string(),
            message: kind.message(score),
            score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertDecision {
    pub needed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<Alert>,
    pub all: Vec<Alert>,
}

impl AlertDecision {
    pub fn none() -> Self {
        Self {
            needed: false,
            primary: None,
            all: Vec::new(),
        }
    }

    fn from_alerts(all: Vec<Alert>) -> Self {
        if all.is_empty() {
            return Self::none();
        }

        let primary = all
            .iter()
            .find(|alert| alert.severity == RiskLevel::Alto)
            .or_else(|| all.first())
            .cloned();

        Self {
            needed: true,
            primary,
            all,
        }
    }

    pub fn summary(&self) -> String {
        match &self.primary {
            Some(primary) if self.all.len() > 1 => {
                format!("{} (+{} more)", primary.title, self.all.len() - 1)
            }
            Some(primary) => primary.title.clone(),
            None => "no alert".to_string(),
        }
    }
}

pub(crate) fn decide_alert(
    risk_overall: RiskLevel,
    adjusted_stress: f64,
    adjusted_burnout: f64,
    weights: &CategoryWeights,
    thresholds: &RiskThresholds,
) -> AlertDecision {
    let risk_stress = thresholds.classify(adjusted_stress);
    let risk_burnout = thresholds.classify(adjusted_burnout);

    let individual = |level: RiskLevel, stress: AlertKind, burnout: AlertKind| {
        let mut alerts = Vec::new();
        if risk_stress == level {
            alerts.push(Alert::new(stress, adjusted_stress));
        }
        if risk_burnout == level {
            alerts.push(Alert::new(burnout, adjusted_burnout));
        }
        alerts
    };

    let mut alerts = individual(RiskLevel::Alto, AlertKind::StressHigh, AlertKind::BurnoutHigh);

    if alerts.is_empty() {
        alerts = individual(
            RiskLevel::Medio,
            AlertKind::StressModerate,
            AlertKind::BurnoutModerate,
        );
    }

    if alerts.is_empty() && risk_overall == RiskLevel::Alto {
        let composite = (adjusted_stress * weights.stress + adjusted_burnout * weights.burnout)
            / (weights.stress + weights.burnout);
        alerts.push(Alert::new(AlertKind::GeneralRisk, composite));
    }

    AlertDecision::from_alerts(alerts)
}
