//! Fantasy scoring and per-player aggregation.

use polars::prelude::*;
use tracing::warn;

use crate::{
    frame::{column_names, float_values, has_column, numeric},
    Result,
};


/// Derived column holding each row's fantasy score.
pub const FANTASY_POINTS: &str = "fantasy_points";

/// Points per unit of each stat.
pub const SCORING_RULES: [(&str, f64); 8] = [
    ("passing_yards", 0.04),
    ("passing_tds", 4.0),
    ("interceptions", -2.0),
    ("rushing_yards", 0.1),
    ("rushing_tds", 6.0),
    ("receiving_yards", 0.1),
    ("receiving_tds", 6.0),
    ("fumbles_lost", -2.0),
];

/// Key columns and output columns of [`aggregate_by_player`].
pub const PLAYER_ID: &str = "player_id";
pub const PLAYER_NAME: &str = "player_name";
pub const AGGREGATE_COLUMNS: [&str; 7] = [
    PLAYER_ID,
    PLAYER_NAME,
    "total_fantasy_points",
    "total_passing_yards",
    "total_rushing_yards",
    "total_receiving_yards",
    "plays_involved",
];

/// Suffix for directory columns that collide with aggregate columns.
const JOIN_SUFFIX: &str = "_right";

/// Scoring fields absent from `frame`; they contribute nothing to the score.
pub fn missing_scoring_fields(frame: &DataFrame) -> Vec<&'static str> {
    SCORING_RULES
        .iter()
        .map(|(field, _)| *field)
        .filter(|field| !has_column(frame, field))
        .collect()
}

/// Per-row fantasy score over the scoring fields `frame` carries. Null and
/// non-numeric cells count as zero.
pub fn fantasy_score_expr(frame: &DataFrame) -> Expr {
    SCORING_RULES
        .iter()
        .filter(|(field, _)| has_column(frame, field))
        .map(|(field, weight)| numeric(field).fill_null(lit(0.0)) * lit(*weight))
        .reduce(|acc, term| acc + term)
        .unwrap_or_else(|| lit(0.0))
}

/// Fantasy score of every row of `frame`, in row order.
pub fn compute_fantasy_score(frame: &DataFrame) -> Result<Vec<f64>> {
    if frame.width() == 0 {
        return Ok(Vec::new());
    }
    let scored = frame
        .clone()
        .lazy()
        .with_column(fantasy_score_expr(frame).alias(FANTASY_POINTS))
        .collect()?;
    Ok(float_values(&scored, FANTASY_POINTS)?
        .into_iter()
        .map(|v| v.unwrap_or(0.0))
        .collect())
}

/// Copy of `frame` with a [`FANTASY_POINTS`] column computed for every row.
/// An existing column of that name is replaced in place.
pub fn with_fantasy_points(frame: &DataFrame) -> Result<DataFrame> {
    for field in missing_scoring_fields(frame) {
        warn!(field, "scoring field not in source columns, scoring it as zero");
    }
    Ok(frame
        .clone()
        .lazy()
        .with_column(fantasy_score_expr(frame).alias(FANTASY_POINTS))
        .collect()?)
}

fn column_total(frame: &DataFrame, field: &str) -> Expr {
    let values = if has_column(frame, field) {
        numeric(field).fill_null(lit(0.0))
    } else {
        lit(0.0)
    };
    values.sum().alias(format!("total_{field}"))
}

/// Group `records` by (`player_id`, `player_name`), total the scoring columns
/// and left-join `players` on `player_id`.
///
/// Rows are sorted by player id then name, null ids last. Every directory
/// column except `player_id` is appended; names already used by the
/// aggregate get a `_right` suffix. Groups without a directory match keep
/// null enrichment. When the directory lists a player id more than once, the
/// first row wins. Rows carrying [`FANTASY_POINTS`] use it; others are scored.
pub fn aggregate_by_player(records: &DataFrame, players: &DataFrame) -> Result<DataFrame> {
    let mut base = records.clone();
    for key in [PLAYER_ID, PLAYER_NAME] {
        if !has_column(&base, key) {
            base.with_column(Series::full_null(key.into(), base.height(), &DataType::String))?;
        }
    }

    let points = if has_column(&base, FANTASY_POINTS) {
        numeric(FANTASY_POINTS).fill_null(fantasy_score_expr(&base))
    } else {
        fantasy_score_expr(&base)
    };

    let mut totals = base
        .clone()
        .lazy()
        .with_column(col(PLAYER_ID).cast(DataType::String))
        .group_by([col(PLAYER_ID), col(PLAYER_NAME)])
        .agg([
            points.sum().alias("total_fantasy_points"),
            column_total(&base, "passing_yards"),
            column_total(&base, "rushing_yards"),
            column_total(&base, "receiving_yards"),
            len().cast(DataType::Int64).alias("plays_involved"),
        ]);

    if has_column(players, PLAYER_ID) {
        totals = totals.left_join(directory(players)?, col(PLAYER_ID), col(PLAYER_ID));
    }

    Ok(totals
        .sort(
            [PLAYER_ID, PLAYER_NAME],
            SortMultipleOptions::default().with_nulls_last(true),
        )
        .collect()?)
}

/// One row per known player id, first row wins, colliding names suffixed.
fn directory(players: &DataFrame) -> Result<LazyFrame> {
    let mut renamed = players.clone();
    let mut enrichment = Vec::new();
    for name in column_names(players) {
        if name == PLAYER_ID {
            continue;
        }
        let out = if AGGREGATE_COLUMNS.contains(&name.as_str()) {
            let suffixed = format!("{name}{JOIN_SUFFIX}");
            renamed.rename(&name, suffixed.as_str().into())?;
            suffixed
        } else {
            name
        };
        enrichment.push(col(out.as_str()).first());
    }

    Ok(renamed
        .lazy()
        .with_column(col(PLAYER_ID).cast(DataType::String))
        .filter(col(PLAYER_ID).is_not_null())
        .group_by_stable([col(PLAYER_ID)])
        .agg(enrichment))
}
