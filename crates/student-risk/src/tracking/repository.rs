use serde::{Deserialize, Serialize};

use super::domain::{EvaluationId, EvaluationRecord, StudentId};
use crate::assessment::{Alert, AlertKind, RiskLevel};

/// Storage abstraction for evaluation history.
pub trait EvaluationRepository: Send + Sync {
    /// Stores `record` unless the student already has `weekly_limit`
    /// evaluations in the same ISO week. Count and insert must be atomic.
    fn append(
        &self,
        record: EvaluationRecord,
        weekly_limit: usize,
    ) -> Result<EvaluationRecord, RepositoryError>;
    /// Oldest first.
    fn history(&self, student_id: &StudentId) -> Result<Vec<EvaluationRecord>, RepositoryError>;
    fn latest(&self, student_id: &StudentId) -> Result<Option<EvaluationRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("evaluation already exists")]
    Conflict,
    #[error("weekly limit of {limit} evaluation(s) reached")]
    QuotaExceeded { limit: usize },
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook for coordinator notifications.
pub trait AlertPublisher: Send + Sync {
    fn publish(&self, alert: StudentAlert) -> Result<(), AlertError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentAlert {
    pub student_id: StudentId,
    pub evaluation_id: EvaluationId,
    pub kind: AlertKind,
    pub severity: RiskLevel,
    pub intervention_required: bool,
    pub primary: bool,
    pub title: String,
    pub message: String,
}

impl StudentAlert {
    pub(crate) fn from_alert(record: &EvaluationRecord, alert: &Alert, primary: bool) -> Self {
        Self {
            student_id: record.student_id.clone(),
            evaluation_id: record.id.clone(),
            kind: alert.kind,
            severity: alert.severity,
            intervention_required: alert.intervention_required,
            primary,
            title: alert.title.clone(),
            message: alert.message.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}
