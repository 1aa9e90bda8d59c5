mod cli;
mod demo;
mod infra;
mod score;

use student_risk::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
