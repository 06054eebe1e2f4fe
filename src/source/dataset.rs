//! Catalog of nflverse datasets and where their release assets live.

use std::fmt;
use std::str::FromStr;

use crate::{
    error::{KbError, Result},
    Season, StatType,
};

/// Release download root for nflverse-data.
pub const NFLVERSE_RELEASES_URL: &str = "https://github.com/nflverse/nflverse-data/releases/download";

const DYNASTYPROCESS_FILES_URL: &str = "https://github.com/dynastyprocess/data/raw/master/files";
const FFOPPORTUNITY_RELEASES_URL: &str =
    "https://github.com/ffverse/ffopportunity/releases/download/latest-data";

/// Every dataset the loaders know how to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    PlayByPlay,
    PlayerStats,
    PlayerSeasonStats,
    TeamStats,
    Schedules,
    Players,
    Rosters,
    RostersWeekly,
    SnapCounts,
    NextGenStats,
    FtnCharting,
    Participation,
    DraftPicks,
    Injuries,
    Contracts,
    Officials,
    Combine,
    DepthCharts,
    Trades,
    FfPlayerIds,
    FfRankings,
    FfOpportunity,
}

impl Dataset {
    pub const ALL: [Dataset; 22] = [
        Dataset::PlayByPlay,
        Dataset::PlayerStats,
        Dataset::PlayerSeasonStats,
        Dataset::TeamStats,
        Dataset::Schedules,
        Dataset::Players,
        Dataset::Rosters,
        Dataset::RostersWeekly,
        Dataset::SnapCounts,
        Dataset::NextGenStats,
        Dataset::FtnCharting,
        Dataset::Participation,
        Dataset::DraftPicks,
        Dataset::Injuries,
        Dataset::Contracts,
        Dataset::Officials,
        Dataset::Combine,
        Dataset::DepthCharts,
        Dataset::Trades,
        Dataset::FfPlayerIds,
        Dataset::FfRankings,
        Dataset::FfOpportunity,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Dataset::PlayByPlay => "play_by_play",
            Dataset::PlayerStats => "player_stats",
            Dataset::PlayerSeasonStats => "player_season_stats",
            Dataset::TeamStats => "team_stats",
            Dataset::Schedules => "schedules",
            Dataset::Players => "players",
            Dataset::Rosters => "rosters",
            Dataset::RostersWeekly => "rosters_weekly",
            Dataset::SnapCounts => "snap_counts",
            Dataset::NextGenStats => "nextgen_stats",
            Dataset::FtnCharting => "ftn_charting",
            Dataset::Participation => "participation",
            Dataset::DraftPicks => "draft_picks",
            Dataset::Injuries => "injuries",
            Dataset::Contracts => "contracts",
            Dataset::Officials => "officials",
            Dataset::Combine => "combine",
            Dataset::DepthCharts => "depth_charts",
            Dataset::Trades => "trades",
            Dataset::FfPlayerIds => "ff_playerids",
            Dataset::FfRankings => "ff_rankings",
            Dataset::FfOpportunity => "ff_opportunity",
        }
    }

    /// Published as one file per season (as opposed to one file for all seasons).
    pub fn is_seasonal(&self) -> bool {
        matches!(
            self,
            Dataset::PlayByPlay
                | Dataset::PlayerStats
                | Dataset::PlayerSeasonStats
                | Dataset::TeamStats
                | Dataset::Rosters
                | Dataset::RostersWeekly
                | Dataset::SnapCounts
                | Dataset::FtnCharting
                | Dataset::Participation
                | Dataset::Injuries
                | Dataset::DepthCharts
                | Dataset::FfOpportunity
        )
    }

    /// Release-relative asset path, or an absolute URL for assets hosted elsewhere.
    ///
    /// Seasonal datasets need `season`; Next Gen Stats defaults to passing.
    pub fn asset(&self, season: Option<Season>, stat_type: Option<StatType>) -> Result<String> {
        let year = || {
            season.map(|s| s.as_u16()).ok_or_else(|| KbError::MissingSeason {
                dataset: self.name().to_string(),
            })
        };

        let asset = match self {
            Dataset::PlayByPlay => format!("pbp/play_by_play_{}.csv.gz", year()?),
            Dataset::PlayerStats => format!("stats_player/stats_player_week_{}.csv.gz", year()?),
            Dataset::PlayerSeasonStats => {
                format!("stats_player/stats_player_reg_{}.csv.gz", year()?)
            }
            Dataset::TeamStats => format!("stats_team/stats_team_week_{}.csv.gz", year()?),
            Dataset::Schedules => "schedules/games.csv.gz".to_string(),
            Dataset::Players => "players/players.csv.gz".to_string(),
            Dataset::Rosters => format!("rosters/roster_{}.csv.gz", year()?),
            Dataset::RostersWeekly => {
                format!("weekly_rosters/roster_weekly_{}.csv.gz", year()?)
            }
            Dataset::SnapCounts => format!("snap_counts/snap_counts_{}.csv.gz", year()?),
            Dataset::NextGenStats => format!(
                "nextgen_stats/ngs_{}.csv.gz",
                stat_type.unwrap_or(StatType::Passing)
            ),
            Dataset::FtnCharting => format!("ftn_charting/ftn_charting_{}.csv.gz", year()?),
            Dataset::Participation => {
                format!("pbp_participation/pbp_participation_{}.csv.gz", year()?)
            }
            Dataset::DraftPicks => "draft_picks/draft_picks.csv.gz".to_string(),
            Dataset::Injuries => format!("injuries/injuries_{}.csv.gz", year()?),
            Dataset::Contracts => "contracts/historical_contracts.csv.gz".to_string(),
            Dataset::Officials => "officials/officials.csv.gz".to_string(),
            Dataset::Combine => "combine/combine.csv.gz".to_string(),
            Dataset::DepthCharts => format!("depth_charts/depth_charts_{}.csv.gz", year()?),
            Dataset::Trades => "trades/trades.csv.gz".to_string(),
            Dataset::FfPlayerIds => format!("{DYNASTYPROCESS_FILES_URL}/db_playerids.csv"),
            Dataset::FfRankings => format!("{DYNASTYPROCESS_FILES_URL}/db_fpecr_latest.csv"),
            Dataset::FfOpportunity => {
                format!("{FFOPPORTUNITY_RELEASES_URL}/ep_weekly_{}.csv.gz", year()?)
            }
        };
        Ok(asset)
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Dataset {
    type Err = KbError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        match wanted.as_str() {
            "pbp" => return Ok(Dataset::PlayByPlay),
            "ngs" | "nextgen" => return Ok(Dataset::NextGenStats),
            _ => {}
        }
        Dataset::ALL
            .into_iter()
            .find(|d| d.name() == wanted)
            .ok_or_else(|| KbError::UnknownDataset {
                name: s.to_string(),
            })
    }
}
