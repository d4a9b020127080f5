//! The `gradebook report` command.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use gradebook_core::{CourseReport, LowPerformer};

use crate::config::load_config_from;

/// JSON shape of a report run.
#[derive(Serialize)]
struct ReportOutput<'a> {
    report: &'a CourseReport,
    threshold: f64,
    low_performers: &'a [LowPerformer],
}

pub fn execute(
    roster: Option<PathBuf>,
    course: String,
    threshold: Option<f64>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let threshold = threshold.unwrap_or(config.low_performer_threshold);
    anyhow::ensure!(
        threshold.is_finite(),
        "threshold must be a finite percentage"
    );

    let Some(roster) = roster.or(config.roster) else {
        anyhow::bail!("no roster given: pass --roster or set `roster` in gradebook.toml");
    };
    let registry = super::load_registry(Some(&roster))?;

    let report = registry.course_report(&course)?;
    let low_performers = registry.low_performers(&course, threshold)?;

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
            println!("### Below {threshold}%\n");
            if low_performers.is_empty() {
                println!("_None._");
            }
            for lp in &low_performers {
                println!("- {} ({}): {:.2}%", lp.name, lp.id, lp.average);
            }
        }
        "json" => {
            let output = ReportOutput {
                report: &report,
                threshold,
                low_performers: &low_performers,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ => print_text(&report, threshold, &low_performers),
    }

    Ok(())
}

fn print_text(report: &CourseReport, threshold: f64, low_performers: &[LowPerformer]) {
    use comfy_table::{Cell, Table};

    println!(
        "{} - {} (professor: {})",
        report.code, report.name, report.professor
    );
    println!(
        "{} evaluation(s), {} student(s)\n",
        report.evaluations.len(),
        report.students.len()
    );

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Number", "Average"]);
    for s in &report.students {
        table.add_row(vec![
            Cell::new(&s.id),
            Cell::new(&s.name),
            Cell::new(&s.student_number),
            Cell::new(
                s.average
                    .map(|avg| format!("{avg:.2}%"))
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]);
    }
    println!("{table}");

    if low_performers.is_empty() {
        println!("\nNo students below {threshold}%.");
    } else {
        println!("\nBelow {threshold}%:");
        for lp in low_performers {
            println!("  {} ({}) {:.2}%", lp.name, lp.id, lp.average);
        }
    }
}
