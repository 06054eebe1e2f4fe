//! Type-safe wrappers for seasons, weeks and stat categories.

pub mod stat_type;
pub mod time;

pub use stat_type::StatType;
pub use time::{Season, Week};
