use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use student_risk::assessment::{Category, EvaluationInput, ScoringConfig, StudentProfile};
use student_risk::tracking::{
    AlertError, AlertPublisher, EvaluationRecord, EvaluationRepository, RepositoryError,
    StudentAlert, StudentId,
};

#[derive(Default, Clone)]
pub(crate) struct InMemoryEvaluationRepository {
    records: Arc<Mutex<HashMap<StudentId, Vec<EvaluationRecord>>>>,
}

impl EvaluationRepository for InMemoryEvaluationRepository {
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
        let this_week = history
            .iter()
            .filter(|existing| existing.iso_week() == week)
            .count();
        if this_week >= weekly_limit {
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
            .and_then(|history| history.last())
            .cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAlertPublisher {
    events: Arc<Mutex<Vec<StudentAlert>>>,
}

impl AlertPublisher for InMemoryAlertPublisher {
    fn publish(&self, alert: StudentAlert) -> Result<(), AlertError> {
        let mut guard = self.events.lock().expect("alert mutex poisoned");
        guard.push(alert);
        Ok(())
    }
}

impl InMemoryAlertPublisher {
    pub(crate) fn events(&self) -> Vec<StudentAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

/// Builds a questionnaire with the configured high-impact flags and unit weights.
pub(crate) fn questionnaire(
    config: &ScoringConfig,
    stress_answers: Vec<i32>,
    burnout_answers: Vec<i32>,
    profile: StudentProfile,
) -> EvaluationInput {
    let stress_weights = config.flag_weights(Category::Stress, &vec![1.0; stress_answers.len()]);
    let burnout_weights =
        config.flag_weights(Category::Burnout, &vec![1.0; burnout_answers.len()]);
    EvaluationInput {
        stress_answers,
        burnout_answers,
        stress_weights,
        burnout_weights,
        student_profile: profile,
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Midday UTC on `date`, used to place demo submissions in distinct ISO weeks.
pub(crate) fn midday(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(12, 0, 0)
        .map(|naive| naive.and_utc())
        .unwrap_or_else(Utc::now)
}
