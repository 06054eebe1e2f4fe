//! Fetch a single nflverse dataset and export it unchanged.

use std::path::PathBuf;

use crate::{
    config::resolve_output_dir,
    export::export_frame,
    source::Dataset,
    Result, Season, StatType,
};

use super::common::{plural, SourceOptions};

/// Parameters for the fetch command
#[derive(Debug, Clone)]
pub struct FetchParams {
    pub dataset: Dataset,
    pub seasons: Vec<Season>,
    pub stat_type: Option<StatType>,
    pub output_dir: Option<PathBuf>,
    pub source: SourceOptions,
}

/// Seasons to request: as given, or the current season for per-season datasets.
pub fn effective_seasons(dataset: Dataset, seasons: &[Season]) -> Vec<Season> {
    if seasons.is_empty() && dataset.is_seasonal() {
        return vec![Season::current()];
    }
    let mut seasons = seasons.to_vec();
    seasons.sort();
    seasons.dedup();
    seasons
}

/// Output file name, e.g. `play_by_play_2023.csv` or `nextgen_stats_rushing_2022_2024.csv`.
pub fn dataset_artifact(dataset: Dataset, seasons: &[Season], stat_type: Option<StatType>) -> String {
    let mut name = dataset.name().to_string();
    if dataset == Dataset::NextGenStats {
        name.push('_');
        name.push_str(stat_type.unwrap_or(StatType::Passing).as_str());
    }

    let first = seasons.iter().min();
    let last = seasons.iter().max();
    match (first, last) {
        (Some(first), Some(last)) if first == last => name.push_str(&format!("_{first}")),
        (Some(first), Some(last)) => name.push_str(&format!("_{first}_{last}")),
        _ => {}
    }

    name.push_str(".csv");
    name
}

pub async fn handle_fetch_dataset(params: FetchParams) -> Result<PathBuf> {
    let seasons = effective_seasons(params.dataset, &params.seasons);
    let output_dir = resolve_output_dir(params.output_dir);
    let source = params.source.build_source()?;

    println!("Fetching {}...", params.dataset);
    let frame = source.load(params.dataset, &seasons, params.stat_type).await?;

    let artifact = dataset_artifact(params.dataset, &seasons, params.stat_type);
    let path = export_frame(&output_dir, &artifact, &frame)?;
    println!(
        "✓ {} ({}, {}) written to {}",
        params.dataset,
        plural(frame.height(), "row"),
        plural(frame.width(), "column"),
        path.display()
    );
    Ok(path)
}
