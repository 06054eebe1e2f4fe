//! Print the season and week the exporter would use today.

use chrono::{Local, NaiveDate};

use crate::{Season, Week};

/// Season, week and kickoff for `date`, one per line.
pub fn describe_date(date: NaiveDate) -> String {
    let season = Season::for_date(date);
    let week = Week::for_date(season, date);
    format!(
        "Season: {}\nWeek: {}\nKickoff: {}",
        season,
        week,
        season.kickoff()
    )
}

pub fn handle_season_info() {
    println!("{}", describe_date(Local::now().date_naive()));
}
