use crate::demo::{run_demo, DemoArgs};
use crate::score::{run_config, run_score, ConfigArgs, ScoreArgs};
use clap::{Parser, Subcommand};
use student_risk::config::AppConfig;
use student_risk::error::AppError;
use student_risk::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "student-risk",
    about = "Score student stress and burnout questionnaires from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score one evaluation read from a JSON file (or stdin with `-`)
    Score(ScoreArgs),
    /// Print the effective scoring configuration as JSON
    Config(ConfigArgs),
    /// Walk a sample student through several weekly evaluations
    Demo(DemoArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Score(args) => run_score(args, &config),
        Command::Config(args) => run_config(args, &config),
        Command::Demo(args) => run_demo(args, &config),
    }
}
