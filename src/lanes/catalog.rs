//! The five knowledge-base lanes written by `nfl-kb update`.

use super::{LaneSpec, RowPredicate, Stage};

/// Efficiency metrics; plays without an EPA value (timeouts, quarter ends) are dropped.
pub fn analytics_lane() -> LaneSpec {
    LaneSpec::new("analytics", "agent_analytics_kb.csv", Stage::PlayByPlay)
        .columns([
            "game_id",
            "week",
            "posteam",
            "defteam",
            "qtr",
            "down",
            "ydstogo",
            "play_type",
            "epa",
            "wpa",
            "cpoe",
            "success",
            "cp",
            "xyac_mean_yardage",
        ])
        .predicate(RowPredicate::NotNull("epa".to_string()))
}

/// Play descriptions and raw outcomes, no models.
pub fn gruden_lane() -> LaneSpec {
    LaneSpec::new("gruden", "agent_gruden_kb.csv", Stage::PlayByPlay).columns([
        "game_id",
        "week",
        "posteam",
        "defteam",
        "desc",
        "play_type",
        "yards_gained",
        "touchdown",
        "fumble",
        "interception",
    ])
}

/// Passing, rushing and receiving Next Gen Stats stacked together.
pub fn scout_lane() -> LaneSpec {
    LaneSpec::new("scout", "agent_scout_kb.csv", Stage::NextGenStats)
}

/// Contracts of active players only.
pub fn gm_lane() -> LaneSpec {
    LaneSpec::new("gm", "agent_gm_kb.csv", Stage::Contracts)
        .predicate(RowPredicate::IsTrue("is_active".to_string()))
}

pub fn fantasy_lane() -> LaneSpec {
    LaneSpec::new("fantasy", "agent_fantasy_kb.csv", Stage::PlayerStats)
}

pub fn default_lanes() -> Vec<LaneSpec> {
    vec![
        analytics_lane(),
        gruden_lane(),
        scout_lane(),
        gm_lane(),
        fantasy_lane(),
    ]
}
