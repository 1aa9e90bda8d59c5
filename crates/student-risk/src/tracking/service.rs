use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::domain::{EvaluationId, EvaluationRecord, StudentId};
use super::repository::{
    AlertError, AlertPublisher, EvaluationRepository, RepositoryError, StudentAlert,
};
use super::trend::{compare, TrendReport};
use crate::assessment::{EvaluationInput, InvalidInputError, RiskEngine, ScoringConfig};
use crate::config::TrackingConfig;

/// Service composing the scoring engine, evaluation history and alert hooks.
pub struct EvaluationService<R, A> {
    repository: Arc<R>,
    alerts: Arc<A>,
    engine: Arc<RiskEngine>,
    weekly_limit: usize,
}

static EVALUATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_evaluation_id() -> EvaluationId {
    let id = EVALUATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    EvaluationId(format!("eval-{id:06}"))
}

impl<R, A> EvaluationService<R, A>
where
    R: EvaluationRepository + 'static,
    A: AlertPublisher + 'static,
{
    pub fn new(repository: Arc<R>, alerts: Arc<A>, config: ScoringConfig) -> Self {
        Self::with_engine(repository, alerts, RiskEngine::new(config))
    }

    pub fn with_engine(repository: Arc<R>, alerts: Arc<A>, engine: RiskEngine) -> Self {
        Self {
            repository,
            alerts,
            engine: Arc::new(engine),
            weekly_limit: TrackingConfig::default().weekly_limit,
        }
    }

    pub fn with_tracking(mut self, tracking: TrackingConfig) -> Self {
        self.weekly_limit = tracking.weekly_limit.max(1);
        self
    }

    pub fn engine(&self) -> &RiskEngine {
        &self.engine
    }

    /// Score a submission, store it and notify coordinators when needed.
    pub fn submit(
        &self,
        student_id: StudentId,
        input: EvaluationInput,
    ) -> Result<EvaluationRecord, SubmissionError> {
        self.submit_at(student_id, input, Utc::now())
    }

    pub fn submit_at(
        &self,
        student_id: StudentId,
        input: EvaluationInput,
        submitted_at: DateTime<Utc>,
    ) -> Result<EvaluationRecord, SubmissionError> {
        let outcome = match self.engine.evaluate(&input) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(student = %student_id, error = %err, "rejected malformed evaluation");
                return Err(err.into());
            }
        };

        let record = EvaluationRecord {
            id: next_evaluation_id(),
            student_id,
            submitted_at,
            profile: input.student_profile,
            outcome,
        };
        debug!(evaluation = %record.id, trace = ?record.outcome.trace, "score trace");

        let stored = match self.repository.append(record, self.weekly_limit) {
            Ok(stored) => stored,
            Err(err) => {
                warn!(error = %err, "evaluation not stored");
                return Err(err.into());
            }
        };

        let decision = &stored.outcome.alert_decision;
        info!(
            student = %stored.student_id,
            evaluation = %stored.id,
            risk = %stored.overall_risk(),
            total = stored.outcome.scores.total,
            alerts = decision.all.len(),
            "evaluation recorded"
        );

        let notices: Vec<StudentAlert> = decision
            .all
            .iter()
            .map(|alert| {
                let primary = decision.primary.as_ref() == Some(alert);
                StudentAlert::from_alert(&stored, alert, primary)
            })
            .collect();

        let mut failed = 0;
        let mut first_error = None;
        for notice in notices {
            let kind = notice.kind;
            if let Err(err) = self.alerts.publish(notice) {
                warn!(evaluation = %stored.id, ?kind, error = %err, "alert dispatch failed");
                failed += 1;
                first_error.get_or_insert(err);
            }
        }

        match first_error {
            Some(source) => Err(SubmissionError::AlertDispatch {
                record: Box::new(stored),
                failed,
                source,
            }),
            None => Ok(stored),
        }
    }

    pub fn history(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<EvaluationRecord>, SubmissionError> {
        Ok(self.repository.history(student_id)?)
    }

    pub fn latest(
        &self,
        student_id: &StudentId,
    ) -> Result<Option<EvaluationRecord>, SubmissionError> {
        Ok(self.repository.latest(student_id)?)
    }

    /// Compares the two most recent evaluations, if the student has two.
    pub fn trend(&self, student_id: &StudentId) -> Result<Option<TrendReport>, SubmissionError> {
        let history = self.repository.history(student_id)?;
        let report = match history.as_slice() {
            [.., previous, current] => Some(compare(previous, current)),
            _ => None,
        };
        Ok(report)
    }
}

/// Error raised by the evaluation service.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Input(#[from] InvalidInputError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    /// The record is stored and every notice was attempted; `failed` of them
    /// were not delivered and `source` is the first failure.
    #[error("evaluation {} stored but {failed} alert(s) could not be dispatched", .record.id)]
    AlertDispatch {
        record: Box<EvaluationRecord>,
        failed: usize,
        #[source]
        source: AlertError,
    },
}
