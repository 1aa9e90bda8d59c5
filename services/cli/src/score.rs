use clap::Args;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use student_risk::assessment::{EvaluationInput, EvaluationOutcome, RiskEngine, ScoringConfig};
use student_risk::config::{read_scoring_config, AppConfig};
use student_risk::error::AppError;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Evaluation input JSON. Use `-` to read from stdin.
    #[arg(long, short)]
    pub(crate) input: PathBuf,
    /// Scoring configuration JSON overriding RISK_SCORING_CONFIG.
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
    /// Emit compact JSON instead of pretty-printed output.
    #[arg(long)]
    pub(crate) compact: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ConfigArgs {
    /// Scoring configuration JSON overriding RISK_SCORING_CONFIG.
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
}

pub(crate) fn run_score(args: ScoreArgs, app: &AppConfig) -> Result<(), AppError> {
    let scoring = resolve_scoring(args.config.as_deref(), app)?;
    let raw = read_source(&args.input)?;
    let outcome = score_json(&raw, scoring)?;

    info!(
        overall = %outcome.risk_levels.overall,
        total = outcome.scores.total,
        alert = outcome.alert_decision.needed,
        "evaluation scored"
    );

    let rendered = if args.compact {
        serde_json::to_string(&outcome)?
    } else {
        serde_json::to_string_pretty(&outcome)?
    };
    println!("{rendered}");
    Ok(())
}

pub(crate) fn run_config(args: ConfigArgs, app: &AppConfig) -> Result<(), AppError> {
    let scoring = resolve_scoring(args.config.as_deref(), app)?;
    println!("{}", serde_json::to_string_pretty(&scoring)?);
    Ok(())
}

pub(crate) fn resolve_scoring(
    override_path: Option<&Path>,
    app: &AppConfig,
) -> Result<ScoringConfig, AppError> {
    match override_path {
        Some(path) => Ok(read_scoring_config(path)?),
        None => Ok(app.scoring.clone()),
    }
}

pub(crate) fn score_json(raw: &str, scoring: ScoringConfig) -> Result<EvaluationOutcome, AppError> {
    let input: EvaluationInput = serde_json::from_str(raw)?;
    Ok(RiskEngine::new(scoring).evaluate(&input)?)
}

fn read_source(path: &Path) -> Result<String, AppError> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}
