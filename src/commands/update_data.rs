//! Knowledge-base update command
//!
//! Runs every export lane for one season and reports per-lane results. Lane
//! failures are printed and recorded in the run summary; they only turn into
//! an error exit when `strict` is set.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::{
    config::resolve_output_dir,
    error::KbError,
    lanes::default_lanes,
    pipeline::{run_pipeline, LaneOutcome, RunSummary},
    source::SourceAdapter,
    Result, Season,
};

use super::common::{plural, SourceOptions};

/// Parameters for the update command
#[derive(Debug, Clone)]
pub struct UpdateParams {
    pub season: Season,
    pub output_dir: Option<PathBuf>,
    pub strict: bool,
    pub source: SourceOptions,
}

/// Fetch from nflverse and write all five knowledge-base files.
pub async fn handle_update_data(params: UpdateParams) -> Result<RunSummary> {
    let output_dir = resolve_output_dir(params.output_dir);
    let source = params.source.build_source()?;

    println!(
        "Updating knowledge base for Season {} in {}",
        params.season,
        output_dir.display()
    );
    update_with_source(&source, params.season, &output_dir, params.strict).await
}

/// The update against any source. Writes the summary file next to the exports.
pub async fn update_with_source<S: SourceAdapter>(
    source: &S,
    season: Season,
    output_dir: &Path,
    strict: bool,
) -> Result<RunSummary> {
    let summary = run_pipeline(source, season, &default_lanes(), output_dir).await?;

    print_summary(&summary);
    match summary.write_json() {
        Ok(path) => println!("Run summary written to {}", path.display()),
        Err(e) => warn!(error = %e, "could not write run summary"),
    }

    let failed = summary.failures().count();
    if strict && failed > 0 {
        return Err(KbError::LanesFailed { failed });
    }
    Ok(summary)
}

fn print_summary(summary: &RunSummary) {
    for report in &summary.lanes {
        match &report.outcome {
            LaneOutcome::Exported {
                rows,
                missing_columns,
                ..
            } => {
                println!(
                    "✓ {:<10} {} ({})",
                    report.lane,
                    report.artifact,
                    plural(*rows, "row")
                );
                if !missing_columns.is_empty() {
                    println!("  ⚠ columns not in source: {}", missing_columns.join(", "));
                }
            }
            LaneOutcome::Failed { reason } => {
                println!("⚠ {:<10} {} failed: {}", report.lane, report.artifact, reason);
            }
        }
    }

    let failed = summary.failures().count();
    if failed == 0 {
        println!("\n✓ Update complete: {} exported", plural(summary.lanes.len(), "lane"));
    } else {
        println!(
            "\n⚠ Update finished with {} failed out of {}",
            plural(failed, "lane"),
            summary.lanes.len()
        );
    }
}
