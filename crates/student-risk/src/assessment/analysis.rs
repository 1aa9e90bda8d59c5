use serde::{Deserialize, Serialize};

use super::config::AnalysisThresholds;
use super::domain::{RiskLevel, StudentProfile};
use super::scoring::round_one_decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    StressDominant,
    BurnoutDominant,
    BalancedRisk,
}

impl PatternKind {
    fn describe(&self) -> (&'static str, &'static str) {
        match self {
            PatternKind::StressDominant => (
                "Stress clearly outweighs burnout",
                "Prioritise stress-management techniques and workload planning",
            ),
            PatternKind::BurnoutDominant => (
                "Burnout clearly outweighs stress",
                "Prioritise rest, recovery time and a review of academic commitments",
            ),
            PatternKind::BalancedRisk => (
                "Stress and burnout are at comparable levels",
                "Maintain a balanced approach covering both stress and burnout",
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskPattern {
    pub kind: PatternKind,
    pub description: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub summary: String,
    pub patterns: Vec<RiskPattern>,
    pub risk_factors: Vec<String>,
    pub strengths: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    General,
    Stress,
    Burnout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: RecommendationCategory,
    pub title: String,
    pub description: String,
    /// 1 is the most urgent.
    pub priority: u8,
}

impl Recommendation {
    fn new(category: RecommendationCategory, title: &str, description: &str, priority: u8) -> Self {
        Self {
            category,
            title: title.to_string(),
            description: description.to_string(),
            priority,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub analysis: Analysis,
    pub recommendations: Vec<Recommendation>,
}

pub(crate) fn generate_analysis(
    adjusted_stress: f64,
    adjusted_burnout: f64,
    total: f64,
    risk_overall: RiskLevel,
    profile: &StudentProfile,
    thresholds: &AnalysisThresholds,
) -> AnalysisReport {
    let analysis = Analysis {
        summary: summary(adjusted_stress, adjusted_burnout, risk_overall),
        patterns: vec![pattern(adjusted_stress, adjusted_burnout, thresholds)],
        risk_factors: risk_factors(adjusted_stress, adjusted_burnout, profile, thresholds),
        strengths: strengths(adjusted_stress, adjusted_burnout, total, thresholds),
    };

    let mut recommendations = vec![overall_recommendation(risk_overall)];
    if adjusted_stress >= thresholds.elevated_score {
        recommendations.push(Recommendation::new(
            RecommendationCategory::Stress,
            "Stress management techniques",
            "Practise breathing exercises, mindfulness or progressive muscle relaxation daily",
            1,
        ));
        recommendations.push(Recommendation::new(
            RecommendationCategory::Stress,
            "Time organisation",
            "Plan the week with realistic study blocks and explicit breaks",
            2,
        ));
    }
    if adjusted_burnout >= thresholds.elevated_score {
        recommendations.push(Recommendation::new(
            RecommendationCategory::Burnout,
            "Rest and disconnection",
            "Schedule regular time away from academic work and protect sleep hours",
            1,
        ));
        recommendations.push(Recommendation::new(
            RecommendationCategory::Burnout,
            "Review academic load",
            "Talk with the academic coordinator about adjusting course load or deadlines",
            2,
        ));
    }
    recommendations.sort_by_key(|recommendation| recommendation.priority);

    AnalysisReport {
        analysis,
        recommendations,
    }
}

fn summary(adjusted_stress: f64, adjusted_burnout: f64, risk_overall: RiskLevel) -> String {
    let average = round_one_decimal((adjusted_stress + adjusted_burnout) / 2.0);
    match risk_overall {
        RiskLevel::Alto => format!(
            "High psychosocial risk (average {average:.1}/10). Immediate attention and professional support are recommended."
        ),
        RiskLevel::Medio => format!(
            "Moderate psychosocial risk (average {average:.1}/10). Preventive measures and follow-up are recommended."
        ),
        RiskLevel::Bajo => format!(
            "Low psychosocial risk (average {average:.1}/10). Keep up the current self-care habits."
        ),
    }
}

fn pattern(
    adjusted_stress: f64,
    adjusted_burnout: f64,
    thresholds: &AnalysisThresholds,
) -> RiskPattern {
    let kind = if adjusted_stress > adjusted_burnout + thresholds.dominance_margin {
        PatternKind::StressDominant
    } else if adjusted_burnout > adjusted_stress + thresholds.dominance_margin {
        PatternKind::BurnoutDominant
    } else {
        PatternKind::BalancedRisk
    };
    let (description, recommendation) = kind.describe();

    RiskPattern {
        kind,
        description: description.to_string(),
        recommendation: recommendation.to_string(),
    }
}

fn risk_factors(
    adjusted_stress: f64,
    adjusted_burnout: f64,
    profile: &StudentProfile,
    thresholds: &AnalysisThresholds,
) -> Vec<String> {
    let mut factors = Vec::new();
    if adjusted_stress >= thresholds.elevated_score {
        factors.push("Elevated stress level".to_string());
    }
    if adjusted_burnout >= thresholds.elevated_score {
        factors.push("Signs of academic burnout".to_string());
    }
    if profile.semester >= thresholds.senior_semester {
        factors.push(format!(
            "Advanced semester ({}) with higher academic demands",
            profile.semester
        ));
    }
    factors
}

fn strengths(
    adjusted_stress: f64,
    adjusted_burnout: f64,
    total: f64,
    thresholds: &AnalysisThresholds,
) -> Vec<String> {
    let mut strengths = Vec::new();
    if adjusted_stress <= thresholds.healthy_score {
        strengths.push("Adequate stress management".to_string());
    }
    if adjusted_burnout <= thresholds.healthy_score {
        strengths.push("Good resistance to burnout".to_string());
    }
    if total <= thresholds.healthy_score {
        strengths.push("Overall emotional balance".to_string());
    }
    strengths
}

fn overall_recommendation(risk_overall: RiskLevel) -> Recommendation {
    match risk_overall {
        RiskLevel::Alto => Recommendation::new(
            RecommendationCategory::General,
            "Seek professional support",
            "Book an appointment with the student wellbeing service as soon as possible",
            1,
        ),
        RiskLevel::Medio => Recommendation::new(
            RecommendationCategory::General,
            "Preventive follow-up",
            "Join a wellbeing workshop and repeat the self-assessment within two weeks",
            2,
        ),
        RiskLevel::Bajo => Recommendation::new(
            RecommendationCategory::General,
            "Keep healthy habits",
            "Maintain regular sleep, physical activity and social contact",
            3,
        ),
    }
}
