//! NFL knowledge-base exporter
//!
//! Pulls public NFL datasets from nflverse releases, narrows them into a
//! handful of purpose-specific CSV files, and computes fantasy totals.
//!
//! ## Features
//!
//! - **Season Resolution**: the NFL season a calendar date belongs to
//! - **Pluggable Sources**: every stage loads through [`source::SourceAdapter`]
//! - **Export Lanes**: fixed column selections and row filters, one CSV each
//! - **Failure Isolation**: a failed download or write only affects its own lanes
//! - **Fantasy Scoring**: fixed-weight scores and per-player season totals
//! - **Caching**: downloaded assets on disk (with a max age) plus parsed frames in memory
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nfl_kb::{
//!     core::CacheConfig, lanes::default_lanes, pipeline::run_pipeline,
//!     source::{NflverseSource, NFLVERSE_RELEASES_URL}, Season,
//! };
//!
//! # async fn example() -> nfl_kb::Result<()> {
//! let source = NflverseSource::new(NFLVERSE_RELEASES_URL, CacheConfig::default())?;
//! let summary = run_pipeline(
//!     &source,
//!     Season::current(),
//!     &default_lanes(),
//!     std::path::Path::new("data"),
//! )
//! .await?;
//!
//! for failed in summary.failures() {
//!     eprintln!("{} did not export", failed.artifact);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export NFL_KB_OUTPUT_DIR=./kb
//! export NFL_KB_CACHE_DIR=/var/cache/nfl-kb
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod frame;
pub mod lanes;
pub mod logging;
pub mod pipeline;
pub mod scoring;
pub mod source;

// Re-export commonly used types
pub use cli::types::{Season, StatType, Week};
pub use error::{KbError, Result};
pub use pipeline::{LaneOutcome, LaneReport, RunSummary};
