use super::common::*;
use crate::assessment::{AlertKind, InvalidInputError, RiskLevel, ScoringConfig};
use crate::config::TrackingConfig;
use crate::tracking::repository::{
    AlertError, AlertPublisher, EvaluationRepository, RepositoryError, StudentAlert,
};
use crate::tracking::{EvaluationService, SubmissionError, TrendDirection};
use std::sync::{Arc, Mutex};

#[test]
fn submit_stores_record_and_publishes_alerts() {
    let (service, repository, alerts) = build_service();
    let id = student("ana");

    let record = service
        .submit_at(id.clone(), input(4, 4, 5), at(0))
        .expect("submission accepted");

    assert_eq!(record.student_id, id);
    assert_eq!(record.submitted_at, at(0));
    assert_eq!(record.overall_risk(), RiskLevel::Alto);
    assert_eq!(record.profile.semester, 5);
    assert_eq!(repository.history(&id).expect("history").len(), 1);

    let events = alerts.events();
    let kinds: Vec<_> = events.iter().map(|event| event.kind).collect();
    assert_eq!(kinds, vec![AlertKind::StressHigh, AlertKind::BurnoutHigh]);
    assert!(events[0].primary);
    assert!(!events[1].primary);
    assert!(events
        .iter()
        .all(|event| event.evaluation_id == record.id && event.intervention_required));
}

#[test]
fn low_risk_submission_publishes_nothing() {
    let (service, _repository, alerts) = build_service();

    let record = service
        .submit_at(student("luis"), input(0, 1, 3), at(0))
        .expect("submission accepted");

    assert_eq!(record.overall_risk(), RiskLevel::Bajo);
    assert!(alerts.events().is_empty());
    assert!(record.summary_view().alert.is_none());
}

#[test]
fn weekly_limit_rejects_second_submission_in_same_week() {
    let (service, repository, _alerts) = build_service();
    let id = student("sofia");

    service
        .submit_at(id.clone(), input(1, 1, 4), at(0))
        .expect("first submission accepted");

    match service.submit_at(id.clone(), input(2, 2, 4), at(3)) {
        Err(SubmissionError::Repository(RepositoryError::QuotaExceeded { limit: 1 })) => {}
        other => panic!("expected weekly quota rejection, got {other:?}"),
    }

    service
        .submit_at(id.clone(), input(2, 2, 4), at(7))
        .expect("next week accepted");
    assert_eq!(repository.history(&id).expect("history").len(), 2);
}

#[test]
fn weekly_limit_is_configurable() {
    let repository = Arc::new(MemoryRepository::default());
    let alerts = Arc::new(MemoryAlerts::default());
    let service = EvaluationService::new(repository, alerts, ScoringConfig::default())
        .with_tracking(TrackingConfig { weekly_limit: 2 });
    let id = student("mateo");

    service
        .submit_at(id.clone(), input(1, 1, 2), at(0))
        .expect("first accepted");
    service
        .submit_at(id.clone(), input(1, 1, 2), at(1))
        .expect("second accepted");
    assert!(matches!(
        service.submit_at(id, input(1, 1, 2), at(2)),
        Err(SubmissionError::Repository(RepositoryError::QuotaExceeded { limit: 2 }))
    ));
}

#[test]
fn malformed_input_is_not_stored() {
    let (service, repository, alerts) = build_service();
    let id = student("valeria");
    let mut submission = input(2, 2, 4);
    submission.stress_answers.push(3);

    match service.submit_at(id.clone(), submission, at(0)) {
        Err(SubmissionError::Input(InvalidInputError::LengthMismatch { answers: 11, .. })) => {}
        other => panic!("expected input rejection, got {other:?}"),
    }

    assert!(repository.history(&id).expect("history").is_empty());
    assert!(alerts.events().is_empty());
}

#[test]
fn repository_failures_are_propagated() {
    let service = EvaluationService::new(
        Arc::new(UnavailableRepository),
        Arc::new(MemoryAlerts::default()),
        ScoringConfig::default(),
    );

    let result = service.submit_at(student("diego"), input(1, 1, 1), at(0));

    assert!(matches!(
        result,
        Err(SubmissionError::Repository(RepositoryError::Unavailable(_)))
    ));
    assert!(service.history(&student("diego")).is_err());
}

#[test]
fn alert_failure_keeps_the_stored_record() {
    let repository = Arc::new(MemoryRepository::default());
    let service = EvaluationService::new(
        repository.clone(),
        Arc::new(OfflineAlerts),
        ScoringConfig::default(),
    );
    let id = student("camila");

    let error = service
        .submit_at(id.clone(), input(4, 0, 6), at(0))
        .expect_err("alert transport is offline");

    match &error {
        SubmissionError::AlertDispatch { record, .. } => {
            assert_eq!(record.student_id, id);
            assert!(error.to_string().contains(&record.id.0));
        }
        other => panic!("expected alert dispatch error, got {other:?}"),
    }
    let latest = service.latest(&id).expect("latest").expect("record stored");
    assert_eq!(latest.overall_risk(), RiskLevel::Medio);
}

#[test]
fn trend_compares_the_two_latest_evaluations() {
    let (service, _repository, _alerts) = build_service();
    let id = student("isabel");

    service
        .submit_at(id.clone(), input(1, 1, 4), at(0))
        .expect("week one");
    assert!(service.trend(&id).expect("trend").is_none());

    service
        .submit_at(id.clone(), input(3, 3, 4), at(7))
        .expect("week two");
    let report = service.trend(&id).expect("trend").expect("two evaluations");

    assert_eq!(report.direction, TrendDirection::Worsening);
    assert_eq!(report.total_delta, 5.0);
    assert_eq!(report.previous_risk, RiskLevel::Bajo);
    assert_eq!(report.current_risk, RiskLevel::Alto);
    assert!(report.escalated);
}

/// Rejects the first notice it sees and accepts the rest.
#[derive(Default)]
struct FlakyAlerts {
    delivered: Mutex<Vec<StudentAlert>>,
    attempts: Mutex<usize>,
}

impl AlertPublisher for FlakyAlerts {
    fn publish(&self, alert: StudentAlert) -> Result<(), AlertError> {
        let mut attempts = self.attempts.lock().expect("attempts mutex poisoned");
        *attempts += 1;
        if *attempts == 1 {
            return Err(AlertError::Transport("connection reset".to_string()));
        }
        self.delivered
            .lock()
            .expect("delivered mutex poisoned")
            .push(alert);
        Ok(())
    }
}

#[test]
fn one_failed_alert_does_not_drop_the_others() {
    let alerts = Arc::new(FlakyAlerts::default());
    let service = EvaluationService::new(
        Arc::new(MemoryRepository::default()),
        alerts.clone(),
        ScoringConfig::default(),
    );

    let error = service
        .submit_at(student("tomas"), input(4, 4, 5), at(0))
        .expect_err("first notice fails");

    match &error {
        SubmissionError::AlertDispatch { failed, .. } => assert_eq!(*failed, 1),
        other => panic!("expected alert dispatch error, got {other:?}"),
    }
    assert!(error.to_string().contains("1 alert(s)"));
    let delivered: Vec<_> = alerts
        .delivered
        .lock()
        .expect("delivered mutex poisoned")
        .iter()
        .map(|alert| alert.kind)
        .collect();
    assert_eq!(delivered, vec![AlertKind::BurnoutHigh]);
    assert_eq!(*alerts.attempts.lock().expect("attempts mutex poisoned"), 2);
}
