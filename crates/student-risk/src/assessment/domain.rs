use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest answer value accepted on the questionnaire scale.
pub const MIN_ANSWER: i32 = 0;
/// Highest answer value accepted on the questionnaire scale.
pub const MAX_ANSWER: i32 = 4;
/// Upper bound of every emitted score.
pub const MAX_SCORE: f64 = 10.0;

/// Assessed dimension of a self-evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "ESTRES")]
    Stress,
    #[serde(rename = "BURNOUT")]
    Burnout,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Stress, Category::Burnout];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Stress => "ESTRES",
            Category::Burnout => "BURNOUT",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Risk band derived from a score on the 0-10 scale.
///
/// Ordering follows severity, so `RiskLevel::Bajo < RiskLevel::Alto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Bajo,
    Medio,
    Alto,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Bajo => "BAJO",
            RiskLevel::Medio => "MEDIO",
            RiskLevel::Alto => "ALTO",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Weight attached positionally to a single answer.
///
/// `high_impact` replaces the fixed question-position lists: the caller flags
/// the questions that deserve the configured boost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionWeight {
    pub weight: f64,
    #[serde(default)]
    pub high_impact: bool,
}

impl QuestionWeight {
    pub fn standard(weight: f64) -> Self {
        Self {
            weight,
            high_impact: false,
        }
    }

    pub fn high_impact(weight: f64) -> Self {
        Self {
            weight,
            high_impact: true,
        }
    }
}

impl Default for QuestionWeight {
    fn default() -> Self {
        Self::standard(1.0)
    }
}

/// Student context used by the adjustment factors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub semester: u8,
    #[serde(default)]
    pub career: String,
}

impl StudentProfile {
    pub fn new(semester: u8, career: impl Into<String>) -> Self {
        Self {
            semester,
            career: career.into(),
        }
    }
}

/// Plain input record handed to the engine for a single submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationInput {
    pub stress_answers: Vec<i32>,
    pub burnout_answers: Vec<i32>,
    pub stress_weights: Vec<QuestionWeight>,
    pub burnout_weights: Vec<QuestionWeight>,
    pub student_profile: StudentProfile,
}

impl EvaluationInput {
    pub fn answers(&self, category: Category) -> &[i32] {
        match category {
            Category::Stress => &self.stress_answers,
            Category::Burnout => &self.burnout_answers,
        }
    }

    pub fn weights(&self, category: Category) -> &[QuestionWeight] {
        match category {
            Category::Stress => &self.stress_weights,
            Category::Burnout => &self.burnout_weights,
        }
    }
}
