use super::common::*;
use crate::assessment::{
    AlertKind, Category, EvaluationInput, InvalidInputError, QuestionWeight, RiskLevel,
    ScoringConfig,
};

fn plain_input(stress: Vec<i32>, burnout: Vec<i32>, semester: u8) -> EvaluationInput {
    EvaluationInput {
        stress_weights: uniform_weights(stress.len()),
        burnout_weights: uniform_weights(burnout.len()),
        stress_answers: stress,
        burnout_answers: burnout,
        student_profile: profile(semester),
    }
}

#[test]
fn maximum_stress_answers_classify_as_high() {
    let engine = engine();
    let config = ScoringConfig::default();
    let input = EvaluationInput {
        stress_answers: vec![4; 6],
        burnout_answers: vec![0; 6],
        stress_weights: config.flag_weights(Category::Stress, &[1.0; 6]),
        burnout_weights: config.flag_weights(Category::Burnout, &[1.0; 6]),
        student_profile: profile(5),
    };

    let outcome = engine.evaluate(&input).expect("valid input");

    assert_eq!(outcome.scores.raw_stress, 10.0);
    assert_eq!(outcome.scores.stress, 10.0);
    assert_eq!(outcome.risk_levels.stress, RiskLevel::Alto);
    assert_eq!(outcome.risk_levels.burnout, RiskLevel::Bajo);
    assert_close(outcome.scores.total, 4.8);
    assert_eq!(outcome.risk_levels.overall, RiskLevel::Medio);
    assert_eq!(outcome.alert_decision.all.len(), 1);
    assert_eq!(outcome.alert_decision.all[0].kind, AlertKind::StressHigh);
}

#[test]
fn all_zero_answers_are_low_risk_without_alert() {
    let engine = engine();

    let outcome = engine
        .evaluate(&uniform_input(0, 0, 5))
        .expect("valid input");

    assert_eq!(outcome.scores.stress, 0.0);
    assert_eq!(outcome.scores.burnout, 0.0);
    assert_eq!(outcome.scores.total, 0.0);
    assert_eq!(outcome.risk_levels.overall, RiskLevel::Bajo);
    assert!(!outcome.alert_decision.needed);
    assert!(outcome.alert_decision.all.is_empty());
    assert_eq!(outcome.analysis.strengths.len(), 3);
}

#[test]
fn single_high_category_fires_exactly_one_alert() {
    let engine = engine();
    let input = plain_input(
        vec![3, 3, 3, 3, 3, 3, 2, 2, 2, 2],
        vec![2, 2, 1, 1, 1, 1, 1, 1, 1, 1],
        4,
    );

    let outcome = engine.evaluate(&input).expect("valid input");

    assert_close(outcome.scores.stress, 6.5);
    assert_close(outcome.scores.burnout, 3.0);
    assert_eq!(outcome.risk_levels.stress, RiskLevel::Alto);
    assert_eq!(outcome.risk_levels.burnout, RiskLevel::Bajo);
    let decision = &outcome.alert_decision;
    assert!(decision.needed);
    assert_eq!(decision.all.len(), 1);
    assert_eq!(decision.all[0].kind, AlertKind::StressHigh);
    assert_eq!(decision.all[0].severity, RiskLevel::Alto);
}

#[test]
fn two_moderate_categories_fire_two_moderate_alerts() {
    let engine = engine();
    let input = plain_input(vec![2; 10], vec![3, 3, 2, 2, 2, 2, 2, 2, 2, 2], 3);

    let outcome = engine.evaluate(&input).expect("valid input");

    assert_close(outcome.scores.stress, 5.0);
    assert_close(outcome.scores.burnout, 5.5);
    assert_close(outcome.trace.composite.unrounded_total, 5.26);
    assert_eq!(outcome.risk_levels.overall, RiskLevel::Medio);
    let kinds: Vec<_> = outcome
        .alert_decision
        .all
        .iter()
        .map(|alert| alert.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![AlertKind::StressModerate, AlertKind::BurnoutModerate]
    );
}

#[test]
fn senior_semester_raises_scores_and_is_traced() {
    let engine = engine();

    let outcome = engine
        .evaluate(&uniform_input(2, 2, 10))
        .expect("valid input");

    assert_eq!(outcome.scores.raw_stress, 5.0);
    assert_close(outcome.scores.stress, 6.0);
    assert_eq!(outcome.risk_levels.stress, RiskLevel::Medio);
    let adjusted = &outcome.trace.stress.adjusted;
    assert_close(adjusted.multiplier, 1.2);
    assert_eq!(adjusted.adjustments[0].factor, "semester");
    assert!(outcome
        .analysis
        .risk_factors
        .iter()
        .any(|factor| factor.contains("semester (10)")));
}

#[test]
fn trace_exposes_per_question_detail() {
    let engine = engine();

    let outcome = engine
        .evaluate(&uniform_input(3, 1, 4))
        .expect("valid input");

    let stress = &outcome.trace.stress.category;
    assert_eq!(stress.questions.len(), 10);
    assert_eq!(stress.questions[0].position, 1);
    assert!(stress.questions[0].high_impact);
    assert!(!stress.questions[3].high_impact);
    assert_close(stress.questions[0].contribution, 4.5);
}

#[test]
fn malformed_input_is_rejected_before_scoring() {
    let engine = engine();
    let mut input = uniform_input(2, 2, 4);
    input.burnout_weights.pop();

    match engine.evaluate(&input) {
        Err(InvalidInputError::LengthMismatch {
            category: Category::Burnout,
            answers: 10,
            weights: 9,
        }) => {}
        other => panic!("expected burnout length mismatch, got {other:?}"),
    }

    let mut input = uniform_input(2, 2, 4);
    input.stress_answers[4] = 7;
    assert!(matches!(
        engine.evaluate(&input),
        Err(InvalidInputError::AnswerOutOfRange {
            category: Category::Stress,
            position: 5,
            value: 7,
        })
    ));
}

#[test]
fn evaluation_is_deterministic() {
    let engine = engine();
    let input = uniform_input(3, 2, 7);

    let first = serde_json::to_vec(&engine.evaluate(&input).expect("valid")).expect("json");
    let second = serde_json::to_vec(&engine.evaluate(&input).expect("valid")).expect("json");

    assert_eq!(first, second);
}

#[test]
fn output_record_uses_camel_case_contract() {
    let engine = engine();

    let outcome = engine
        .evaluate(&uniform_input(0, 0, 1))
        .expect("valid input");
    let json = serde_json::to_value(&outcome).expect("serializes");

    assert_eq!(json["scores"]["rawStress"], 0.0);
    assert_eq!(json["riskLevels"]["overall"], "BAJO");
    assert_eq!(json["alertDecision"]["needed"], false);
    assert_eq!(json["analysis"]["patterns"][0]["kind"], "balanced_risk");
    assert!(json["analysis"]["riskFactors"].is_array());
    assert!(json["recommendations"][0]["priority"].is_u64());
}

#[test]
fn input_record_accepts_camel_case_json() {
    let raw = r#"{
        "stressAnswers": [4, 2],
        "burnoutAnswers": [1],
        "stressWeights": [{"weight": 1.0, "highImpact": true}, {"weight": 2.0}],
        "burnoutWeights": [{"weight": 0.5}],
        "studentProfile": {"semester": 6, "career": "Psicologia"}
    }"#;

    let input: EvaluationInput = serde_json::from_str(raw).expect("parses");

    assert_eq!(input.stress_weights[0], QuestionWeight::high_impact(1.0));
    assert_eq!(input.stress_weights[1], QuestionWeight::standard(2.0));
    assert_eq!(input.student_profile.semester, 6);
    assert!(engine().evaluate(&input).is_ok());
}

#[test]
fn overflowing_weights_never_reach_scoring() {
    let engine = engine();
    let mut input = plain_input(vec![4, 4], vec![4, 4], 5);
    input.stress_weights = vec![QuestionWeight::standard(1e308); 2];
    input.burnout_weights = vec![QuestionWeight::standard(1e308); 2];

    assert!(matches!(
        engine.evaluate(&input),
        Err(InvalidInputError::WeightOverflow {
            category: Category::Stress
        })
    ));
}

#[test]
fn overall_strength_uses_the_unrounded_composite() {
    let engine = engine();
    let answers = vec![2, 2, 2, 2, 1, 1, 1, 1, 1, 1];

    let outcome = engine
        .evaluate(&plain_input(answers.clone(), answers, 8))
        .expect("valid input");

    assert!(outcome.trace.composite.unrounded_total > 4.0);
    assert_eq!(outcome.scores.total, 4.0);
    assert_eq!(outcome.risk_levels.overall, RiskLevel::Medio);
    assert!(outcome.analysis.strengths.is_empty());
}
