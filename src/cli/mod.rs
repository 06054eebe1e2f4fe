//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::{commands::SourceOptions, source::Dataset};
use types::{Season, StatType};

/// Download and cache options shared by every command that fetches data
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Cache directory (or set `NFL_KB_CACHE_DIR` env var).
    #[clap(long)]
    pub cache_dir: Option<PathBuf>,

    /// Skip the cache: always download, never store.
    #[clap(long)]
    pub no_cache: bool,

    /// Re-download cached files older than this many hours (default 12).
    #[clap(long, value_name = "HOURS")]
    pub max_age_hours: Option<u64>,

    /// Ignore cached files and download everything again.
    #[clap(long)]
    pub refresh: bool,

    /// Release root to download assets from (or set `NFL_KB_BASE_URL` env var).
    #[clap(long)]
    pub base_url: Option<String>,
}

impl From<SourceArgs> for SourceOptions {
    fn from(args: SourceArgs) -> Self {
        SourceOptions {
            cache_dir: args.cache_dir,
            no_cache: args.no_cache,
            max_age_hours: args.max_age_hours,
            refresh: args.refresh,
            base_url: args.base_url,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Rebuild the five knowledge-base CSV files for a season.
    ///
    /// Each file is exported independently; a failed download or write is
    /// reported and the remaining files are still produced.
    Update {
        /// Season year (defaults to the current NFL season).
        #[clap(long, short, default_value_t = Season::default())]
        season: Season,

        /// Output directory (or set `NFL_KB_OUTPUT_DIR` env var, default `data`).
        #[clap(long, short)]
        output_dir: Option<PathBuf>,

        /// Exit with an error if any file failed to export.
        #[clap(long)]
        strict: bool,

        #[clap(flatten)]
        source: SourceArgs,
    },

    /// Download one nflverse dataset and write it as CSV.
    Fetch {
        /// Dataset name, e.g. `play_by_play`, `nextgen_stats`, `contracts`.
        dataset: Dataset,

        /// Season year (repeatable): `-s 2022 -s 2023`.
        #[clap(long = "season", short = 's')]
        seasons: Vec<Season>,

        /// Next Gen Stats category: passing, rushing or receiving.
        #[clap(long)]
        stat_type: Option<StatType>,

        /// Output directory (or set `NFL_KB_OUTPUT_DIR` env var, default `data`).
        #[clap(long, short)]
        output_dir: Option<PathBuf>,

        #[clap(flatten)]
        source: SourceArgs,
    },

    /// Season fantasy totals per player, joined to the player directory.
    Fantasy {
        /// Season year (repeatable, defaults to the current season).
        #[clap(long = "season", short = 's')]
        seasons: Vec<Season>,

        /// Output directory (or set `NFL_KB_OUTPUT_DIR` env var, default `data`).
        #[clap(long, short)]
        output_dir: Option<PathBuf>,

        #[clap(flatten)]
        source: SourceArgs,
    },

    /// Print the current season, week and kickoff date.
    Season,

    /// Delete all cached downloads.
    ClearCache {
        /// Cache directory (or set `NFL_KB_CACHE_DIR` env var).
        #[clap(long)]
        cache_dir: Option<PathBuf>,
    },
}

#[derive(Debug, Parser)]
#[clap(
    name = "nfl-kb",
    version,
    about = "Build NFL knowledge-base CSV files from nflverse data"
)]
pub struct NflKb {
    /// Debug-level logging (overridden by `RUST_LOG`).
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}
