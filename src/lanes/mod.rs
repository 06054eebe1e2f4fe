//! Export lanes: fixed column selections and row predicates over a source frame.
//!
//! A lane never mutates its input. Requested columns that the source does not
//! carry are dropped from the selection and reported back to the caller in
//! [`LaneOutput::missing_columns`].

pub mod catalog;

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::{
    frame::{column_names, has_column, present, truthy},
    Result,
};


pub use catalog::default_lanes;

/// Upstream fetch a lane reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    PlayByPlay,
    NextGenStats,
    Contracts,
    PlayerStats,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::PlayByPlay,
        Stage::NextGenStats,
        Stage::Contracts,
        Stage::PlayerStats,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Stage::PlayByPlay => "play-by-play",
            Stage::NextGenStats => "next gen stats",
            Stage::Contracts => "contracts",
            Stage::PlayerStats => "player stats",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Row filter applied before column selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowPredicate {
    /// Field holds a value: not null, not empty, not `NA`.
    NotNull(String),
    /// Field reads as true (`TRUE`, `true`, boolean true or 1).
    IsTrue(String),
}

impl RowPredicate {
    /// Filter expression for `frame`. A field the frame lacks matches no row.
    pub fn expr(&self, frame: &DataFrame) -> Expr {
        match self {
            RowPredicate::NotNull(field) => present(frame, field),
            RowPredicate::IsTrue(field) => truthy(frame, field),
        }
    }
}

/// One lane: where it reads from, what it keeps, where it writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneSpec {
    pub name: String,
    pub artifact: String,
    pub stage: Stage,
    /// `None` keeps every source column.
    pub columns: Option<Vec<String>>,
    pub predicate: Option<RowPredicate>,
}

/// Result of running a lane over a frame.
#[derive(Debug, Clone)]
pub struct LaneOutput {
    pub frame: DataFrame,
    pub missing_columns: Vec<String>,
}

impl LaneSpec {
    pub fn new(name: impl Into<String>, artifact: impl Into<String>, stage: Stage) -> Self {
        Self {
            name: name.into(),
            artifact: artifact.into(),
            stage,
            columns: None,
            predicate: None,
        }
    }

    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn predicate(mut self, predicate: RowPredicate) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Select this lane's rows and columns from `source`, preserving row
    /// order and cell values.
    pub fn apply(&self, source: &DataFrame) -> Result<LaneOutput> {
        let (kept, missing_columns): (Vec<String>, Vec<String>) = match &self.columns {
            None => (column_names(source), Vec::new()),
            Some(wanted) => wanted.iter().cloned().partition(|c| has_column(source, c)),
        };

        if !missing_columns.is_empty() {
            warn!(
                lane = %self.name,
                missing = ?missing_columns,
                "requested columns not in source, dropping them"
            );
        }

        let mut plan = source.clone().lazy();
        if let Some(predicate) = &self.predicate {
            plan = plan.filter(predicate.expr(source));
        }
        if self.columns.is_some() {
            plan = plan.select(kept.iter().map(|c| col(c.as_str())).collect::<Vec<_>>());
        }

        Ok(LaneOutput {
            frame: plan.collect()?,
            missing_columns,
        })
    }
}
