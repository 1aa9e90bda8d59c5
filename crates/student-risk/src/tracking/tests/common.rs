use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::assessment::{Category, EvaluationInput, ScoringConfig, StudentProfile};
use crate::tracking::domain::{EvaluationRecord, StudentId};
use crate::tracking::repository::{
    AlertError, AlertPublisher, EvaluationRepository, RepositoryError, StudentAlert,
};
use crate::tracking::EvaluationService;

pub(super) fn student(name: &str) -> StudentId {
    StudentId(format!("student-{name}"))
}

/// Monday 2025-03-03 plus `days`, at 09:00 UTC.
pub(super) fn at(days: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0)
        .single()
        .expect("valid timestamp")
        + chrono::Duration::days(days)
}

pub(super) fn input(stress: i32, burnout: i32, semester: u8) -> EvaluationInput {
    let config = ScoringConfig::default();
    let plain = [1.0; 10];
    EvaluationInput {
        stress_answers: vec![stress; 10],
        burnout_answers: vec![burnout; 10],
        stress_weights: config.flag_weights(Category::Stress, &plain),
        burnout_weights: config.flag_weights(Category::Burnout, &plain),
        student_profile: StudentProfile::new(semester, "Medicina"),
    }
}

pub(super) fn build_service() -> (
    EvaluationService<MemoryRepository, MemoryAlerts>,
    Arc<MemoryRepository>,
    Arc<MemoryAlerts>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let alerts = Arc::new(MemoryAlerts::default());
    let service = EvaluationService::new(
        repository.clone(),
        alerts.clone(),
        ScoringConfig::default(),
    );
    (service, repository, alerts)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<StudentId, Vec<EvaluationRecord>>>>,
}

impl EvaluationRepository for MemoryRepository {
    fn append(
        &self,
        record: EvaluationRecord,
        weekly_limit: usize,
    ) -> Result<EvaluationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let history = guard.entry(record.student_id.clone()).or_default();
        if history.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        let week = record.iso_week();
        let in_week = history
            .iter()
            .filter(|existing| existing.iso_week() == week)
            .count();
        if in_week >= weekly_limit {
            return Err(RepositoryError::QuotaExceeded {
                limit: weekly_limit,
            });
        }
        history.push(record.clone());
        history.sort_by_key(|existing| existing.submitted_at);
        Ok(record)
    }

    fn history(&self, student_id: &StudentId) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(student_id).cloned().unwrap_or_default())
    }

    fn latest(&self, student_id: &StudentId) -> Result<Option<EvaluationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .get(student_id)
            .and_then(|history| history.last().cloned()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryAlerts {
    events: Arc<Mutex<Vec<StudentAlert>>>,
}

impl MemoryAlerts {
    pub(super) fn events(&self) -> Vec<StudentAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

impl AlertPublisher for MemoryAlerts {
    fn publish(&self, alert: StudentAlert) -> Result<(), AlertError> {
        self.events
            .lock()
            .expect("alert mutex poisoned")
            .push(alert);
        Ok(())
    }
}

pub(super) struct OfflineAlerts;

impl AlertPublisher for OfflineAlerts {
    fn publish(&self, _alert: StudentAlert) -> Result<(), AlertError> {
        Err(AlertError::Transport("smtp relay offline".to_string()))
    }
}

pub(super) struct UnavailableRepository;

impl EvaluationRepository for UnavailableRepository {
    fn append(
        &self,
        _record: EvaluationRecord,
        _weekly_limit: usize,
    ) -> Result<EvaluationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn history(&self, _student_id: &StudentId) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn latest(&self, _student_id: &StudentId) -> Result<Option<EvaluationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}
