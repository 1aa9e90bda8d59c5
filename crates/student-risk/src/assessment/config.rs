use serde::{Deserialize, Serialize};

use super::domain::{Category, QuestionWeight, RiskLevel};

/// Scoring constants, tunable without touching the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub high_impact_multiplier: f64,
    /// 1-indexed question positions flagged as high impact by `flag_weights`.
    pub stress_high_impact_positions: Vec<usize>,
    pub burnout_high_impact_positions: Vec<usize>,
    pub category_weights: CategoryWeights,
    pub thresholds: RiskThresholds,
    pub semester_factors: Vec<SemesterFactorEntry>,
    pub analysis: AnalysisThresholds,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            high_impact_multiplier: 1.5,
            stress_high_impact_positions: vec![1, 2, 3, 7, 8, 9],
            burnout_high_impact_positions: vec![1, 2, 3, 7, 8, 9],
            category_weights: CategoryWeights::default(),
            thresholds: RiskThresholds::default(),
            semester_factors: vec![
                SemesterFactorEntry::new(1, 1, 0.90),
                SemesterFactorEntry::new(2, 2, 0.95),
                SemesterFactorEntry::new(3, 5, 1.00),
                SemesterFactorEntry::new(6, 6, 1.05),
                SemesterFactorEntry::new(7, 7, 1.10),
                SemesterFactorEntry::new(8, 8, 1.15),
                SemesterFactorEntry::new(9, 10, 1.20),
            ],
            analysis: AnalysisThresholds::default(),
        }
    }
}

impl ScoringConfig {
    pub fn high_impact_positions(&self, category: Category) -> &[usize] {
        match category {
            Category::Stress => &self.stress_high_impact_positions,
            Category::Burnout => &self.burnout_high_impact_positions,
        }
    }

    /// Turns plain questionnaire weights into flagged weights using the
    /// configured high-impact positions for `category`.
    pub fn flag_weights(&self, category: Category, weights: &[f64]) -> Vec<QuestionWeight> {
        let positions = self.high_impact_positions(category);
        weights
            .iter()
            .enumerate()
            .map(|(index, weight)| QuestionWeight {
                weight: *weight,
                high_impact: positions.contains(&(index + 1)),
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        if !(self.high_impact_multiplier.is_finite() && self.high_impact_multiplier > 0.0) {
            return Err(ScoringConfigError::InvalidMultiplier {
                name: "high_impact_multiplier".to_string(),
                value: self.high_impact_multiplier,
            });
        }

        for category in Category::ALL {
            let weight = self.category_weights.weight(category);
            if !(weight.is_finite() && weight > 0.0) {
                return Err(ScoringConfigError::InvalidCategoryWeight { category, weight });
            }
            if self.high_impact_positions(category).contains(&0) {
                return Err(ScoringConfigError::ZeroPosition { category });
            }
        }

        let RiskThresholds {
            low_max,
            medium_max,
        } = self.thresholds;
        if !(0.0..=medium_max).contains(&low_max) || medium_max > 10.0 {
            return Err(ScoringConfigError::UnorderedThresholds {
                low_max,
                medium_max,
            });
        }

        for entry in &self.semester_factors {
            if entry.from > entry.to {
                return Err(ScoringConfigError::InvalidSemesterRange {
                    from: entry.from,
                    to: entry.to,
                });
            }
            if !(entry.multiplier.is_finite() && entry.multiplier > 0.0) {
                return Err(ScoringConfigError::InvalidMultiplier {
                    name: format!("semester {}-{}", entry.from, entry.to),
                    value: entry.multiplier,
                });
            }
        }

        Ok(())
    }
}

/// Relative weight of each category in the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub stress: f64,
    pub burnout: f64,
}

impl CategoryWeights {
    pub fn weight(&self, category: Category) -> f64 {
        match category {
            Category::Stress => self.stress,
            Category::Burnout => self.burnout,
        }
    }
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            stress: 1.2,
            burnout: 1.3,
        }
    }
}

/// Inclusive upper bounds of the BAJO and MEDIO bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub low_max: f64,
    pub medium_max: f64,
}

impl RiskThresholds {
    pub fn classify(&self, score: f64) -> RiskLevel {
        if score > self.medium_max {
            RiskLevel::Alto
        } else if score > self.low_max {
            RiskLevel::Medio
        } else {
            RiskLevel::Bajo
        }
    }
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            low_max: 4.0,
            medium_max: 6.0,
        }
    }
}

/// Multiplier applied to students whose semester falls in `from..=to`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SemesterFactorEntry {
    pub from: u8,
    pub to: u8,
    pub multiplier: f64,
}

impl SemesterFactorEntry {
    pub fn new(from: u8, to: u8, multiplier: f64) -> Self {
        Self {
            from,
            to,
            multiplier,
        }
    }

    pub fn covers(&self, semester: u8) -> bool {
        (self.from..=self.to).contains(&semester)
    }
}

/// Cut-offs used by the narrative analysis and recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisThresholds {
    /// Scores at or above this value count as a risk factor.
    pub elevated_score: f64,
    /// Scores at or below this value count as a strength.
    pub healthy_score: f64,
    pub dominance_margin: f64,
    pub senior_semester: u8,
}

impl Default for AnalysisThresholds {
    fn default() -> Self {
        Self {
            elevated_score: 7.0,
            healthy_score: 4.0,
            dominance_margin: 2.0,
            senior_semester: 8,
        }
    }
}

/// Reasons a scoring configuration is rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("{name} must be a positive finite multiplier, found {value}")]
    InvalidMultiplier { name: String, value: f64 },
    #[error("{category} composite weight must be positive, found {weight}")]
    InvalidCategoryWeight { category: Category, weight: f64 },
    #[error("risk thresholds must satisfy 0 <= low ({low_max}) <= medium ({medium_max}) <= 10")]
    UnorderedThresholds { low_max: f64, medium_max: f64 },
    #[error("semester range {from}-{to} is empty")]
    InvalidSemesterRange { from: u8, to: u8 },
    #[error("{category} high-impact positions are 1-indexed; 0 is not a valid position")]
    ZeroPosition { category: Category },
}
