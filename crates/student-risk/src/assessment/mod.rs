//! Risk scoring engine for stress and burnout self-assessments.
//!
//! Everything in this module is pure: no I/O, no clock and no logging. The
//! working behind every score is returned as a [`ScoreTrace`] so callers can
//! decide what to record.

mod adjustment;
mod alerts;
mod analysis;
mod config;
pub mod domain;
mod scoring;
mod validation;

#[cfg(test)]
mod tests;

pub use adjustment::{
    AdjustedScore, AdjustmentFactor, AdjustmentPipeline, AppliedAdjustment, SemesterFactor,
};
pub use alerts::{Alert, AlertDecision, AlertKind, AlertTier};
pub use analysis::{
    Analysis, AnalysisReport, PatternKind, Recommendation, RecommendationCategory, RiskPattern,
};
pub use config::{
    AnalysisThresholds, CategoryWeights, RiskThresholds, ScoringConfig, ScoringConfigError,
    SemesterFactorEntry,
};
pub use domain::{
    Category, EvaluationInput, QuestionWeight, RiskLevel, StudentProfile, MAX_ANSWER, MAX_SCORE,
    MIN_ANSWER,
};
pub use scoring::{classify, CategoryScore, CompositeScore, QuestionDetail};
pub use validation::InvalidInputError;

use scoring::round_one_decimal;
use serde::{Deserialize, Serialize};

/// Stateless engine applying a [`ScoringConfig`] to questionnaire answers.
pub struct RiskEngine {
    config: ScoringConfig,
    adjustments: AdjustmentPipeline,
}

impl RiskEngine {
    pub fn new(config: ScoringConfig) -> Self {
        let adjustments = AdjustmentPipeline::from_config(&config);
        Self {
            config,
            adjustments,
        }
    }

    /// Adds a contextual factor after the semester factor.
    pub fn with_factor(mut self, factor: impl AdjustmentFactor + 'static) -> Self {
        self.adjustments = self.adjustments.with_factor(factor);
        self
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score_category(
        &self,
        answers: &[i32],
        weights: &[QuestionWeight],
        category: Category,
    ) -> Result<CategoryScore, InvalidInputError> {
        validation::validate_category(
            category,
            answers,
            weights,
            self.config.high_impact_multiplier,
        )?;
        Ok(scoring::score_category(
            category,
            answers,
            weights,
            self.config.high_impact_multiplier,
        ))
    }

    pub fn apply_adjustment(&self, score: f64, profile: &StudentProfile) -> AdjustedScore {
        self.adjustments.apply(score, profile)
    }

    pub fn classify(&self, score: f64) -> RiskLevel {
        self.config.thresholds.classify(score)
    }

    pub fn compose_and_classify(
        &self,
        adjusted_stress: f64,
        adjusted_burnout: f64,
    ) -> CompositeScore {
        scoring::compose_and_classify(
            adjusted_stress,
            adjusted_burnout,
            &self.config.category_weights,
            &self.config.thresholds,
        )
    }

    pub fn decide_alert(
        &self,
        risk_overall: RiskLevel,
        adjusted_stress: f64,
        adjusted_burnout: f64,
    ) -> AlertDecision {
        alerts::decide_alert(
            risk_overall,
            adjusted_stress,
            adjusted_burnout,
            &self.config.category_weights,
            &self.config.thresholds,
        )
    }

    /// `total` is the unrounded composite, the same value `risk_overall` was
    /// classified from.
    pub fn generate_analysis(
        &self,
        adjusted_stress: f64,
        adjusted_burnout: f64,
        total: f64,
        risk_overall: RiskLevel,
        profile: &StudentProfile,
    ) -> AnalysisReport {
        analysis::generate_analysis(
            adjusted_stress,
            adjusted_burnout,
            total,
            risk_overall,
            profile,
            &self.config.analysis,
        )
    }

    /// Runs the full pipeline for one submission.
    ///
    /// Input is validated up front; nothing is computed for malformed input.
    pub fn evaluate(
        &self,
        input: &EvaluationInput,
    ) -> Result<EvaluationOutcome, InvalidInputError> {
        validation::validate_input(input, self.config.high_impact_multiplier)?;
        let profile = &input.student_profile;

        let stress = self.category_trace(Category::Stress, input, profile);
        let burnout = self.category_trace(Category::Burnout, input, profile);
        let adjusted_stress = stress.adjusted.value;
        let adjusted_burnout = burnout.adjusted.value;

        let composite = self.compose_and_classify(adjusted_stress, adjusted_burnout);
        let alert_decision =
            self.decide_alert(composite.risk_overall, adjusted_stress, adjusted_burnout);
        let AnalysisReport {
            analysis,
            recommendations,
        } = self.generate_analysis(
            adjusted_stress,
            adjusted_burnout,
            composite.unrounded_total,
            composite.risk_overall,
            profile,
        );

        Ok(EvaluationOutcome {
            scores: Scores {
                stress: round_one_decimal(adjusted_stress),
                burnout: round_one_decimal(adjusted_burnout),
                total: composite.total,
                raw_stress: stress.category.score,
                raw_burnout: burnout.category.score,
            },
            risk_levels: RiskLevels {
                overall: composite.risk_overall,
                stress: composite.risk_stress,
                burnout: composite.risk_burnout,
            },
            analysis,
            recommendations,
            alert_decision,
            trace: ScoreTrace {
                stress,
                burnout,
                composite,
            },
        })
    }

    fn category_trace(
        &self,
        category: Category,
        input: &EvaluationInput,
        profile: &StudentProfile,
    ) -> CategoryTrace {
        let category_score = scoring::score_category(
            category,
            input.answers(category),
            input.weights(category),
            self.config.high_impact_multiplier,
        );
        let adjusted = self.apply_adjustment(category_score.score, profile);

        CategoryTrace {
            category: category_score,
            adjusted,
        }
    }
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

/// Display scores; adjusted values rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scores {
    pub stress: f64,
    pub burnout: f64,
    pub total: f64,
    pub raw_stress: f64,
    pub raw_burnout: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskLevels {
    pub overall: RiskLevel,
    pub stress: RiskLevel,
    pub burnout: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTrace {
    pub category: CategoryScore,
    pub adjusted: AdjustedScore,
}

/// Structured explanation of an evaluation, including unrounded values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreTrace {
    pub stress: CategoryTrace,
    pub burnout: CategoryTrace,
    pub composite: CompositeScore,
}

/// Output record of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationOutcome {
    pub scores: Scores,
    pub risk_levels: RiskLevels,
    pub analysis: Analysis,
    pub recommendations: Vec<Recommendation>,
    pub alert_decision: AlertDecision,
    pub trace: ScoreTrace,
}
