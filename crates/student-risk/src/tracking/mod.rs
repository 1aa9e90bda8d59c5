//! Evaluation history, alert dispatch and trend comparison around the engine.
//!
//! Storage and notification are collaborator traits; weekly submission limits
//! are enforced by the repository so concurrent submissions cannot race.

pub mod domain;
pub mod repository;
pub mod service;
pub mod trend;

#[cfg(test)]
mod tests;

pub use domain::{EvaluationId, EvaluationRecord, EvaluationSummaryView, StudentId};
pub use repository::{
    AlertError, AlertPublisher, EvaluationRepository, RepositoryError, StudentAlert,
};
pub use service::{EvaluationService, SubmissionError};
pub use trend::{compare, TrendDirection, TrendReport, STABILITY_BAND};
