use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::assessment::{ScoringConfig, ScoringConfigError};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
    pub tracking: TrackingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let scoring = match env::var("RISK_SCORING_CONFIG") {
            Ok(path) if !path.trim().is_empty() => read_scoring_config(Path::new(path.trim()))?,
            _ => ScoringConfig::default(),
        };

        let weekly_limit = match env::var("RISK_WEEKLY_LIMIT") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or(ConfigError::InvalidWeeklyLimit { value: raw })?,
            Err(_) => TrackingConfig::default().weekly_limit,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            scoring,
            tracking: TrackingConfig { weekly_limit },
        })
    }
}

/// Reads and validates a JSON scoring configuration. Missing keys keep their defaults.
pub fn read_scoring_config(path: &Path) -> Result<ScoringConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::ScoringFile {
        path: path.to_path_buf(),
        source,
    })?;
    let config: ScoringConfig =
        serde_json::from_str(&raw).map_err(|source| ConfigError::ScoringFormat {
            path: path.to_path_buf(),
            source,
        })?;
    config.validate().map_err(ConfigError::InvalidScoring)?;
    Ok(config)
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Submission rules enforced around the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackingConfig {
    /// Evaluations accepted per student per ISO week.
    pub weekly_limit: usize,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self { weekly_limit: 1 }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidWeeklyLimit {
        value: String,
    },
    ScoringFile {
        path: PathBuf,
        source: std::io::Error,
    },
    ScoringFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidScoring(ScoringConfigError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidWeeklyLimit { value } => {
                write!(f, "RISK_WEEKLY_LIMIT must be a positive integer, found '{value}'")
            }
            ConfigError::ScoringFile { path, .. } => {
                write!(f, "unable to read scoring config {}", path.display())
            }
            ConfigError::ScoringFormat { path, source } => {
                write!(f, "scoring config {} is not valid: {source}", path.display())
            }
            ConfigError::InvalidScoring(err) => write!(f, "invalid scoring config: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidWeeklyLimit { .. } => None,
            ConfigError::ScoringFile { source, .. } => Some(source),
            ConfigError::ScoringFormat { source, .. } => Some(source),
            ConfigError::InvalidScoring(err) => Some(err),
        }
    }
}
