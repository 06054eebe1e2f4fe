//! Season fantasy totals per player
//!
//! Scores every weekly stat line, sums per player, and attaches the player
//! directory so the report carries position and team information.

use polars::prelude::*;
use std::path::PathBuf;

use crate::{
    config::resolve_output_dir,
    export::export_frame,
    frame::{float_values, rename_column, text_values},
    scoring::{aggregate_by_player, with_fantasy_points, PLAYER_ID, PLAYER_NAME},
    source::Dataset,
    Result, Season,
};

use super::common::{plural, SourceOptions};

pub const FANTASY_REPORT_FILE: &str = "fantasy_player_totals.csv";

/// Identifier column of the nflverse player directory.
const DIRECTORY_ID: &str = "gsis_id";

const TOP_N: usize = 10;

/// Parameters for the fantasy command
#[derive(Debug, Clone)]
pub struct FantasyParams {
    pub seasons: Vec<Season>,
    pub output_dir: Option<PathBuf>,
    pub source: SourceOptions,
}

const TOTAL_POINTS: &str = "total_fantasy_points";

/// Score `stats`, aggregate per player and join the directory in `players`.
pub fn build_fantasy_report(stats: &DataFrame, players: &DataFrame) -> Result<DataFrame> {
    let scored = with_fantasy_points(stats)?;
    let players = rename_column(players, DIRECTORY_ID, PLAYER_ID)?;
    aggregate_by_player(&scored, &players)
}

/// Highest scorers first, ties by name; rows without a numeric total are left out.
pub fn top_scorers(report: &DataFrame, n: usize) -> Result<Vec<(String, f64)>> {
    let ranked = report
        .clone()
        .lazy()
        .sort(
            [TOTAL_POINTS, PLAYER_NAME],
            SortMultipleOptions::default()
                .with_order_descending_multi([true, false])
                .with_nulls_last(true),
        )
        .collect()?;

    let ids = text_values(&ranked, PLAYER_ID)?;
    let names = text_values(&ranked, PLAYER_NAME)?;
    let points = float_values(&ranked, TOTAL_POINTS)?;

    Ok(names
        .into_iter()
        .zip(ids)
        .zip(points)
        .filter_map(|((name, id), points)| {
            let label = name.or(id).unwrap_or_default();
            Some((label, points?))
        })
        .take(n)
        .collect())
}

pub async fn handle_fantasy_report(params: FantasyParams) -> Result<PathBuf> {
    let seasons = if params.seasons.is_empty() {
        vec![Season::current()]
    } else {
        params.seasons
    };
    let output_dir = resolve_output_dir(params.output_dir);
    let source = params.source.build_source()?;

    let labels: Vec<String> = seasons.iter().map(ToString::to_string).collect();
    println!("Loading weekly player stats for {}...", labels.join(", "));
    let stats = source.load(Dataset::PlayerStats, &seasons, None).await?;
    let players = source.load(Dataset::Players, &[], None).await?;

    let report = build_fantasy_report(&stats, &players)?;
    let path = export_frame(&output_dir, FANTASY_REPORT_FILE, &report)?;
    println!(
        "✓ {} written to {}",
        plural(report.height(), "player"),
        path.display()
    );

    let top = top_scorers(&report, TOP_N)?;
    if !top.is_empty() {
        println!("\nTop {} by fantasy points:", top.len());
        for (rank, (name, points)) in top.iter().enumerate() {
            println!("{:>2}. {:<28} {:>8.2}", rank + 1, name, points);
        }
    }
    Ok(path)
}
