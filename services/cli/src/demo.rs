use crate::infra::{midday, questionnaire, InMemoryAlertPublisher, InMemoryEvaluationRepository};
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use std::sync::Arc;
use student_risk::assessment::{EvaluationInput, ScoringConfig, StudentProfile};
use student_risk::config::AppConfig;
use student_risk::error::AppError;
use student_risk::tracking::{
    EvaluationRecord, EvaluationService, StudentId, SubmissionError, TrendReport,
};

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Student identifier used for the sample history.
    #[arg(long, default_value = "A00000001")]
    pub(crate) student: String,
    /// Semester of the sample student (1-10).
    #[arg(long, default_value_t = 8)]
    pub(crate) semester: u8,
    /// First submission date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) start: Option<NaiveDate>,
    /// Print the recommendations of every week instead of only the last one.
    #[arg(long)]
    pub(crate) verbose: bool,
}

/// Weekly answer sets for a student whose stress climbs and then eases.
const WEEKS: [(&[i32], &[i32]); 4] = [
    (&[1, 1, 2, 1, 0, 1, 2, 1, 1, 1], &[1, 0, 1, 1, 1, 0, 1, 1, 0, 1]),
    (&[2, 3, 2, 2, 1, 2, 3, 2, 2, 2], &[2, 1, 2, 2, 1, 2, 2, 1, 2, 2]),
    (&[4, 4, 3, 3, 3, 2, 4, 4, 3, 3], &[3, 3, 2, 3, 2, 3, 3, 2, 3, 3]),
    (&[3, 2, 3, 2, 2, 2, 2, 3, 2, 2], &[2, 2, 3, 2, 2, 2, 2, 3, 2, 2]),
];

pub(crate) fn run_demo(args: DemoArgs, app: &AppConfig) -> Result<(), AppError> {
    let DemoArgs {
        student,
        semester,
        start,
        verbose,
    } = args;
    let start = start.unwrap_or_else(|| Local::now().date_naive());
    let student = StudentId(student);

    let repository = Arc::new(InMemoryEvaluationRepository::default());
    let alerts = Arc::new(InMemoryAlertPublisher::default());
    let service = EvaluationService::new(repository, alerts.clone(), app.scoring.clone())
        .with_tracking(app.tracking);

    println!("Student risk demo for {student} (semester {semester})");
    let profile = StudentProfile::new(semester, "Ingenieria");

    for (week, (stress, burnout)) in WEEKS.iter().enumerate() {
        let date = start + Duration::weeks(week as i64);
        let input = sample_input(&app.scoring, stress, burnout, profile.clone());
        let record = match service.submit_at(student.clone(), input, midday(date)) {
            Ok(record) => record,
            Err(SubmissionError::AlertDispatch {
                record,
                failed,
                source,
            }) => {
                println!("  {failed} alert(s) not dispatched: {source}");
                *record
            }
            Err(err) => return Err(err.into()),
        };
        render_week(week + 1, &record, verbose || week + 1 == WEEKS.len());
    }

    let retry = sample_input(&app.scoring, WEEKS[0].0, WEEKS[0].1, profile);
    let last_week = start + Duration::weeks(WEEKS.len() as i64 - 1);
    match service.submit_at(student.clone(), retry, midday(last_week)) {
        Err(SubmissionError::Repository(err)) => {
            println!("\nSecond submission that week: {err}")
        }
        Err(err) => return Err(err.into()),
        Ok(record) => println!("\nSecond submission that week accepted as {}", record.id),
    }

    let events = alerts.events();
    println!("\nCoordinator notifications ({})", events.len());
    for event in &events {
        let marker = if event.primary { "*" } else { " " };
        println!(
            " {marker} [{}] {} {}: {}",
            event.severity, event.evaluation_id, event.title, event.message
        );
    }

    if let Some(report) = service.trend(&student)? {
        render_trend(&report);
    }

    Ok(())
}

fn sample_input(
    config: &ScoringConfig,
    stress: &[i32],
    burnout: &[i32],
    profile: StudentProfile,
) -> EvaluationInput {
    questionnaire(config, stress.to_vec(), burnout.to_vec(), profile)
}

fn render_week(week: usize, record: &EvaluationRecord, with_recommendations: bool) {
    let scores = &record.outcome.scores;
    let levels = &record.outcome.risk_levels;
    println!(
        "\nWeek {week} ({}): {}",
        record.submitted_at.format("%Y-%m-%d"),
        record.outcome.analysis.summary
    );
    println!(
        "  stress {:.1} ({}), burnout {:.1} ({}), total {:.1} ({})",
        scores.stress, levels.stress, scores.burnout, levels.burnout, scores.total, levels.overall
    );
    println!("  alert: {}", record.outcome.alert_decision.summary());

    for pattern in &record.outcome.analysis.patterns {
        println!("  pattern: {}", pattern.description);
    }
    if with_recommendations {
        for recommendation in &record.outcome.recommendations {
            println!(
                "  [p{}] {}: {}",
                recommendation.priority, recommendation.title, recommendation.description
            );
        }
    }
}

fn render_trend(report: &TrendReport) {
    println!(
        "\nTrend {} -> {}: {:?} (total {:+.1}, stress {:+.1}, burnout {:+.1})",
        report.previous,
        report.current,
        report.direction,
        report.total_delta,
        report.stress_delta,
        report.burnout_delta
    );
    if report.escalated {
        println!(
            "  risk escalated from {} to {}",
            report.previous_risk, report.current_risk
        );
    }
}
