//! Error types for the NFL knowledge-base exporter

use thiserror::Error;


pub type Result<T> = std::result::Result<T, KbError>;

#[derive(Error, Debug)]
pub enum KbError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data frame error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse number: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),

    #[error("Cache error: {message}")]
    Cache { message: String },

    #[error("Source adapter error: {message}")]
    Source { message: String },

    #[error("Unknown dataset: {name}")]
    UnknownDataset { name: String },

    #[error("Invalid stat type: {stat_type}")]
    InvalidStatType { stat_type: String },

    #[error("Dataset {dataset} requires at least one season")]
    MissingSeason { dataset: String },

    #[error("{failed} lane(s) failed to export")]
    LanesFailed { failed: usize },

    #[error("Failed to set up logging: {0}")]
    LogSetup(String),
}

impl From<anyhow::Error> for KbError {
    fn from(err: anyhow::Error) -> Self {
        KbError::Source {
            message: format!("{err:#}"),
        }
    }
}
