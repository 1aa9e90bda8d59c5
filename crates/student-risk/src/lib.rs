//! Psychosocial risk scoring for student stress and burnout self-assessments.
//!
//! [`assessment`] holds the pure scoring engine; [`tracking`] wires it to
//! evaluation history and coordinator alerts.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod tracking;
