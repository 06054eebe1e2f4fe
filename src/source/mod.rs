//! Upstream data sources.
//!
//! The export pipeline only talks to a [`SourceAdapter`]; [`NflverseSource`]
//! is the HTTP implementation used by the CLI.

pub mod csv_frame;
pub mod dataset;
pub mod nflverse;

use std::sync::Arc;

use polars::prelude::DataFrame;

use crate::{Result, Season, StatType};

pub use csv_frame::parse_csv_bytes;
pub use dataset::{Dataset, NFLVERSE_RELEASES_URL};
pub use nflverse::NflverseSource;

/// The four raw frames the export lanes consume.
#[allow(async_fn_in_trait)]
pub trait SourceAdapter {
    /// Every play of `season`.
    async fn load_play_by_play(&self, season: Season) -> Result<Arc<DataFrame>>;

    /// One Next Gen Stats split, restricted to `season`.
    async fn load_next_gen_stats(&self, stat_type: StatType, season: Season) -> Result<Arc<DataFrame>>;

    /// Historical contracts, all seasons.
    async fn load_contracts(&self) -> Result<Arc<DataFrame>>;

    /// Season-level player totals for `season`.
    async fn load_player_stats(&self, season: Season) -> Result<Arc<DataFrame>>;
}
