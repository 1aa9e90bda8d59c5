use serde::{Deserialize, Serialize};

use super::config::{ScoringConfig, SemesterFactorEntry};
use super::domain::{StudentProfile, MAX_SCORE};

/// Contextual multiplier applied to a category score.
///
/// Factors compose multiplicatively before the final clamp.
pub trait AdjustmentFactor: Send + Sync {
    fn name(&self) -> &'static str;
    fn multiplier(&self, profile: &StudentProfile) -> f64;
}

/// Semester-indexed multiplier table. Semesters outside the table are neutral.
#[derive(Debug, Clone)]
pub struct SemesterFactor {
    table: Vec<SemesterFactorEntry>,
}

impl SemesterFactor {
    pub fn new(table: Vec<SemesterFactorEntry>) -> Self {
        Self { table }
    }
}

impl From<&ScoringConfig> for SemesterFactor {
    fn from(config: &ScoringConfig) -> Self {
        Self::new(config.semester_factors.clone())
    }
}

impl AdjustmentFactor for SemesterFactor {
    fn name(&self) -> &'static str {
        "semester"
    }

    fn multiplier(&self, profile: &StudentProfile) -> f64 {
        self.table
            .iter()
            .find(|entry| entry.covers(profile.semester))
            .map(|entry| entry.multiplier)
            .unwrap_or(1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedAdjustment {
    pub factor: String,
    pub multiplier: f64,
}

/// Category score after every adjustment factor, clamped to 0-10.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustedScore {
    pub base: f64,
    pub multiplier: f64,
    pub value: f64,
    pub adjustments: Vec<AppliedAdjustment>,
}

/// Ordered set of adjustment factors shared by both categories.
#[derive(Default)]
pub struct AdjustmentPipeline {
    factors: Vec<Box<dyn AdjustmentFactor>>,
}

impl AdjustmentPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new().with_factor(SemesterFactor::from(config))
    }

    pub fn with_factor(mut self, factor: impl AdjustmentFactor + 'static) -> Self {
        self.factors.push(Box::new(factor));
        self
    }

    pub fn apply(&self, score: f64, profile: &StudentProfile) -> AdjustedScore {
        let adjustments: Vec<AppliedAdjustment> = self
            .factors
            .iter()
            .map(|factor| AppliedAdjustment {
                factor: factor.name().to_string(),
                multiplier: factor.multiplier(profile),
            })
            .collect();
        let multiplier = adjustments
            .iter()
            .map(|adjustment| adjustment.multiplier)
            .product::<f64>();

        AdjustedScore {
            base: score,
            multiplier,
            value: (score * multiplier).clamp(0.0, MAX_SCORE),
            adjustments,
        }
    }
}
