use crate::assessment::{EvaluationInput, QuestionWeight, RiskEngine, ScoringConfig, StudentProfile};

pub(super) fn engine() -> RiskEngine {
    RiskEngine::new(ScoringConfig::default())
}

pub(super) fn uniform_weights(count: usize) -> Vec<QuestionWeight> {
    vec![QuestionWeight::standard(1.0); count]
}

pub(super) fn profile(semester: u8) -> StudentProfile {
    StudentProfile::new(semester, "Ingenieria de Sistemas")
}

/// Uniform answers for both categories, with high-impact flags from the default config.
pub(super) fn uniform_input(stress: i32, burnout: i32, semester: u8) -> EvaluationInput {
    let config = ScoringConfig::default();
    let plain = vec![1.0; 10];
    EvaluationInput {
        stress_answers: vec![stress; 10],
        burnout_answers: vec![burnout; 10],
        stress_weights: config.flag_weights(crate::assessment::Category::Stress, &plain),
        burnout_weights: config.flag_weights(crate::assessment::Category::Burnout, &plain),
        student_profile: profile(semester),
    }
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
