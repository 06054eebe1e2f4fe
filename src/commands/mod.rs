//! Command implementations for the nfl-kb CLI

pub mod clear_cache;
pub mod common;
pub mod fantasy_report;
pub mod fetch_dataset;
pub mod season_info;
pub mod update_data;


pub use common::SourceOptions;
