//! The knowledge-base update: fetch each source stage once, run every lane
//! over the materialized frames, and export one CSV per lane.
//!
//! A failure in one stage or lane is recorded in the [`RunSummary`] and never
//! stops the others.

use chrono::{DateTime, Local};
use polars::prelude::DataFrame;
use rayon::prelude::*;
use serde::Serialize;
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{error, info, warn};

use crate::{
    export::export_frame,
    frame::stack,
    lanes::{LaneSpec, Stage},
    source::SourceAdapter,
    Result, Season, StatType,
};

/// File name of the machine-readable run summary.
pub const SUMMARY_FILE: &str = "run_summary.json";

/// Loaded frame per stage, or the reason the fetch failed.
pub type StageFrames = BTreeMap<Stage, std::result::Result<Arc<DataFrame>, String>>;

/// What happened to one lane.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LaneOutcome {
    Exported {
        path: PathBuf,
        rows: usize,
        columns: usize,
        missing_columns: Vec<String>,
    },
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaneReport {
    pub lane: String,
    pub artifact: String,
    pub stage: Stage,
    #[serde(flatten)]
    pub outcome: LaneOutcome,
}

impl LaneReport {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, LaneOutcome::Exported { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub season: Season,
    pub output_dir: PathBuf,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    pub lanes: Vec<LaneReport>,
}

impl RunSummary {
    pub fn all_succeeded(&self) -> bool {
        self.lanes.iter().all(LaneReport::is_success)
    }

    pub fn failures(&self) -> impl Iterator<Item = &LaneReport> {
        self.lanes.iter().filter(|l| !l.is_success())
    }

    /// Write the summary as pretty JSON into the output directory.
    pub fn write_json(&self) -> Result<PathBuf> {
        let path = self.output_dir.join(SUMMARY_FILE);
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(path)
    }
}

/// Fetch one stage. Next Gen Stats stacks the passing, rushing and receiving splits.
pub async fn load_stage<S: SourceAdapter>(
    source: &S,
    stage: Stage,
    season: Season,
) -> Result<Arc<DataFrame>> {
    match stage {
        Stage::PlayByPlay => source.load_play_by_play(season).await,
        Stage::NextGenStats => {
            let mut splits = Vec::with_capacity(StatType::ALL.len());
            for stat_type in StatType::ALL {
                let split = source.load_next_gen_stats(stat_type, season).await?;
                splits.push(split.as_ref().clone());
            }
            Ok(Arc::new(stack(&splits)?))
        }
        Stage::Contracts => source.load_contracts().await,
        Stage::PlayerStats => source.load_player_stats(season).await,
    }
}

/// Fetch every stage `lanes` needs, each at most once, isolating failures.
pub async fn load_stages<S: SourceAdapter>(
    source: &S,
    season: Season,
    lanes: &[LaneSpec],
) -> StageFrames {
    let mut frames = StageFrames::new();
    for stage in Stage::ALL {
        if !lanes.iter().any(|l| l.stage == stage) {
            continue;
        }
        info!(%stage, %season, "fetching stage");
        let loaded = match load_stage(source, stage, season).await {
            Ok(frame) => {
                info!(%stage, rows = frame.height(), "stage loaded");
                Ok(frame)
            }
            Err(e) => {
                error!(%stage, error = %e, "stage fetch failed, skipping its lanes");
                Err(format!("fetching {stage} failed: {e}"))
            }
        };
        frames.insert(stage, loaded);
    }
    frames
}

fn export_lane(lane: &LaneSpec, source: &DataFrame, output_dir: &Path) -> Result<LaneOutcome> {
    let output = lane.apply(source)?;
    let path = export_frame(output_dir, &lane.artifact, &output.frame)?;
    info!(lane = %lane.name, path = %path.display(), rows = output.frame.height(), "lane exported");
    Ok(LaneOutcome::Exported {
        path,
        rows: output.frame.height(),
        columns: output.frame.width(),
        missing_columns: output.missing_columns,
    })
}

/// Run one lane against its stage frame and export the result.
pub fn run_lane(lane: &LaneSpec, frames: &StageFrames, output_dir: &Path) -> LaneReport {
    let outcome = match frames.get(&lane.stage) {
        None => LaneOutcome::Failed {
            reason: format!("stage {} was not loaded", lane.stage),
        },
        Some(Err(reason)) => LaneOutcome::Failed {
            reason: reason.clone(),
        },
        Some(Ok(source)) => export_lane(lane, source, output_dir).unwrap_or_else(|e| {
            error!(lane = %lane.name, error = %e, "lane export failed");
            LaneOutcome::Failed {
                reason: format!("writing {} failed: {e}", lane.artifact),
            }
        }),
    };

    LaneReport {
        lane: lane.name.clone(),
        artifact: lane.artifact.clone(),
        stage: lane.stage,
        outcome,
    }
}

/// Run all lanes in parallel. Reports come back in lane order.
pub fn run_lanes(lanes: &[LaneSpec], frames: &StageFrames, output_dir: &Path) -> Vec<LaneReport> {
    lanes
        .par_iter()
        .map(|lane| run_lane(lane, frames, output_dir))
        .collect()
}

/// Full update for `season`. Only failing to create `output_dir` is fatal.
pub async fn run_pipeline<S: SourceAdapter>(
    source: &S,
    season: Season,
    lanes: &[LaneSpec],
    output_dir: &Path,
) -> Result<RunSummary> {
    let started_at = Local::now();
    fs::create_dir_all(output_dir)?;
    info!(%season, output_dir = %output_dir.display(), "starting knowledge-base update");

    let frames = load_stages(source, season, lanes).await;
    let reports = run_lanes(lanes, &frames, output_dir);

    let summary = RunSummary {
        season,
        output_dir: output_dir.to_path_buf(),
        started_at,
        finished_at: Local::now(),
        lanes: reports,
    };

    for failed in summary.failures() {
        if let LaneOutcome::Failed { reason } = &failed.outcome {
            warn!(lane = %failed.lane, %reason, "lane did not export");
        }
    }
    info!(
        exported = summary.lanes.len() - summary.failures().count(),
        failed = summary.failures().count(),
        "update complete"
    );

    Ok(summary)
}
