//! Next Gen Stats categories.

use crate::error::KbError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Next Gen Stats split published by the data source.
///
/// # Examples
///
/// ```rust
/// use nfl_kb::StatType;
///
/// let rushing: StatType = "Rushing".parse().unwrap();
/// assert_eq!(rushing, StatType::Rushing);
/// assert_eq!(rushing.to_string(), "rushing");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatType {
    Passing,
    Rushing,
    Receiving,
}

impl StatType {
    /// All splits, in the order the scout lane stacks them.
    pub const ALL: [StatType; 3] = [StatType::Passing, StatType::Rushing, StatType::Receiving];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatType::Passing => "passing",
            StatType::Rushing => "rushing",
            StatType::Receiving => "receiving",
        }
    }
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StatType {
    type Err = KbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "passing" | "pass" => Ok(StatType::Passing),
            "rushing" | "rush" => Ok(StatType::Rushing),
            "receiving" | "rec" => Ok(StatType::Receiving),
            _ => Err(KbError::InvalidStatType {
                stat_type: s.to_string(),
            }),
        }
    }
}
