//! Time-related types for NFL seasons and weeks.

use crate::error::{KbError, Result};
use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Month of year after which the new calendar year's season is considered active.
const SEASON_ROLLOVER_MONTH: u32 = 2;

/// Last week number including the postseason.
const MAX_WEEK: u16 = 22;

/// Type-safe wrapper for Season years
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Season(pub u16);

impl Season {
    pub fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Season active on `date`: January and February still belong to the
    /// previous calendar year's season.
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use nfl_kb::Season;
    ///
    /// let feb = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
    /// let mar = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    /// assert_eq!(Season::for_date(feb), Season::new(2023));
    /// assert_eq!(Season::for_date(mar), Season::new(2024));
    /// ```
    pub fn for_date(date: NaiveDate) -> Self {
        let year = if date.month() > SEASON_ROLLOVER_MONTH {
            date.year()
        } else {
            date.year() - 1
        };
        Self(year as u16)
    }

    /// Season active today, by local wall-clock time.
    pub fn current() -> Self {
        Self::for_date(Local::now().date_naive())
    }

    /// Thursday after Labor Day (first Monday of September): the week 1 kickoff.
    pub fn kickoff(&self) -> NaiveDate {
        match NaiveDate::from_weekday_of_month_opt(self.0 as i32, 9, Weekday::Mon, 1) {
            Some(labor_day) => labor_day + Duration::days(3),
            None => NaiveDate::MIN,
        }
    }
}

impl Default for Season {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = KbError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.parse()?))
    }
}

/// Type-safe wrapper for Week numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Week(pub u16);

impl Week {
    pub fn new(week: u16) -> Self {
        Self(week)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Week of `season` that `date` falls in, counted in whole weeks from the
    /// kickoff Thursday. Dates before kickoff are week 1; the count stops at
    /// the Super Bowl week.
    pub fn for_date(season: Season, date: NaiveDate) -> Self {
        let days = (date - season.kickoff()).num_days();
        if days < 0 {
            return Self(1);
        }
        let week = (days / 7 + 1).min(MAX_WEEK as i64);
        Self(week as u16)
    }

    /// Current week of the current season.
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self::for_date(Season::for_date(today), today)
    }
}

impl Default for Week {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Week {
    type Err = KbError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.parse()?))
    }
}
