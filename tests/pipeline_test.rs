//! End-to-end tests for the knowledge-base update using an in-memory source.

use std::{
    collections::HashMap,
    fs,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use nfl_kb::{
    lanes::{default_lanes, LaneSpec, RowPredicate, Stage},
    pipeline::{load_stages, run_pipeline, SUMMARY_FILE},
    source::{parse_csv_bytes, SourceAdapter},
    KbError, LaneOutcome, Result, Season, StatType,
};
use polars::prelude::{df, DataFrame};
use tempfile::tempdir;

/// Serves fixed frames; stages without a table fail like an unreachable host.
#[derive(Default)]
struct MemorySource {
    play_by_play: Option<Arc<DataFrame>>,
    next_gen: HashMap<StatType, Arc<DataFrame>>,
    contracts: Option<Arc<DataFrame>>,
    player_stats: Option<Arc<DataFrame>>,
    calls: Mutex<HashMap<&'static str, usize>>,
    total_calls: AtomicUsize,
}

impl MemorySource {
    fn record(&self, what: &'static str) {
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        *self.calls.lock().unwrap().entry(what).or_default() += 1;
    }

    fn calls(&self, what: &str) -> usize {
        self.calls.lock().unwrap().get(what).copied().unwrap_or(0)
    }

    fn serve(frame: &Option<Arc<DataFrame>>, what: &str) -> Result<Arc<DataFrame>> {
        frame.clone().ok_or_else(|| KbError::Source {
            message: format!("{what} unavailable"),
        })
    }
}

impl SourceAdapter for MemorySource {
    async fn load_play_by_play(&self, _season: Season) -> Result<Arc<DataFrame>> {
        self.record("pbp");
        Self::serve(&self.play_by_play, "play-by-play")
    }

    async fn load_next_gen_stats(&self, stat_type: StatType, _season: Season) -> Result<Arc<DataFrame>> {
        self.record("ngs");
        Self::serve(&self.next_gen.get(&stat_type).cloned(), "next gen stats")
    }

    async fn load_contracts(&self) -> Result<Arc<DataFrame>> {
        self.record("contracts");
        Self::serve(&self.contracts, "contracts")
    }

    async fn load_player_stats(&self, _season: Season) -> Result<Arc<DataFrame>> {
        self.record("player_stats");
        Self::serve(&self.player_stats, "player stats")
    }
}

fn play_by_play() -> DataFrame {
    df!(
        "game_id" => ["2023_01_DET_KC", "2023_01_DET_KC", "2023_01_DET_KC"],
        "play_type" => ["pass", "no_play", "run"],
        "epa" => [Some("0.3"), Some("NA"), Some("-1.2")],
        "desc" => [
            "(15:00) P.Mahomes pass short right to T.Kelce",
            "Timeout #1 by DET",
            "(14:21) I.Pacheco left end to KC 30 for -2 yards",
        ],
        "yards_gained" => [Some("7"), None, Some("-2")],
    )
    .unwrap()
}

fn contracts() -> DataFrame {
    df!(
        "player" => ["Patrick Mahomes", "Tom Brady", "Travis Kelce", "Drew Brees", "Chris Jones"],
        "is_active" => ["TRUE", "FALSE", "TRUE", "FALSE", "TRUE"],
        "value" => ["100.0", "100.0", "100.0", "100.0", "100.0"],
    )
    .unwrap()
}

fn next_gen() -> HashMap<StatType, Arc<DataFrame>> {
    let split = |player: &str, column: &str, value: &str| {
        Arc::new(
            df!(
                "player_display_name" => [player],
                "season" => ["2023"],
                column => [value],
            )
            .unwrap(),
        )
    };

    HashMap::from([
        (StatType::Passing, split("Patrick Mahomes", "avg_time_to_throw", "2.8")),
        (StatType::Rushing, split("Isiah Pacheco", "efficiency", "3.9")),
        (StatType::Receiving, split("Travis Kelce", "avg_separation", "3.1")),
    ])
}

fn player_stats() -> DataFrame {
    df!(
        "player_id" => ["00-0033873"],
        "player_name" => ["P.Mahomes"],
        "passing_yards" => ["4183"],
    )
    .unwrap()
}

fn full_source() -> MemorySource {
    MemorySource {
        play_by_play: Some(Arc::new(play_by_play())),
        next_gen: next_gen(),
        contracts: Some(Arc::new(contracts())),
        player_stats: Some(Arc::new(player_stats())),
        ..Default::default()
    }
}

fn read_csv(path: &std::path::Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let header = reader.headers().unwrap().iter().map(String::from).collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    (header, rows)
}

#[tokio::test]
async fn test_full_update_writes_every_artifact() {
    let dir = tempdir().unwrap();
    let source = full_source();

    let summary = run_pipeline(&source, Season::new(2023), &default_lanes(), dir.path())
        .await
        .unwrap();

    assert!(summary.all_succeeded());
    for artifact in [
        "agent_analytics_kb.csv",
        "agent_gruden_kb.csv",
        "agent_scout_kb.csv",
        "agent_gm_kb.csv",
        "agent_fantasy_kb.csv",
    ] {
        assert!(dir.path().join(artifact).exists(), "{artifact} missing");
    }
}

#[tokio::test]
async fn test_analytics_drops_plays_without_epa() {
    let dir = tempdir().unwrap();
    run_pipeline(&full_source(), Season::new(2023), &default_lanes(), dir.path())
        .await
        .unwrap();

    let (header, rows) = read_csv(&dir.path().join("agent_analytics_kb.csv"));
    assert_eq!(header, vec!["game_id", "play_type", "epa"]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][2], "0.3");
    assert_eq!(rows[1][2], "-1.2");
}

#[tokio::test]
async fn test_gruden_keeps_every_play() {
    let dir = tempdir().unwrap();
    run_pipeline(&full_source(), Season::new(2023), &default_lanes(), dir.path())
        .await
        .unwrap();

    let (header, rows) = read_csv(&dir.path().join("agent_gruden_kb.csv"));
    assert_eq!(header, vec!["game_id", "desc", "play_type", "yards_gained"]);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1][1], "Timeout #1 by DET");
    assert_eq!(rows[1][3], "");
}

#[tokio::test]
async fn test_gm_keeps_active_contracts_only() {
    let dir = tempdir().unwrap();
    run_pipeline(&full_source(), Season::new(2023), &default_lanes(), dir.path())
        .await
        .unwrap();

    let (_, rows) = read_csv(&dir.path().join("agent_gm_kb.csv"));
    assert_eq!(rows.len(), 3);
}

#[tokio::test]
async fn test_scout_stacks_next_gen_splits() {
    let dir = tempdir().unwrap();
    run_pipeline(&full_source(), Season::new(2023), &default_lanes(), dir.path())
        .await
        .unwrap();

    let (header, rows) = read_csv(&dir.path().join("agent_scout_kb.csv"));
    assert_eq!(
        header,
        vec![
            "player_display_name",
            "season",
            "avg_time_to_throw",
            "efficiency",
            "avg_separation"
        ]
    );
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2], vec!["Travis Kelce", "2023", "", "", "3.1"]);
}

#[tokio::test]
async fn test_failed_stage_only_fails_its_lanes() {
    let dir = tempdir().unwrap();
    let source = MemorySource {
        next_gen: HashMap::new(),
        ..full_source()
    };

    let summary = run_pipeline(&source, Season::new(2023), &default_lanes(), dir.path())
        .await
        .unwrap();

    let failed: Vec<&str> = summary.failures().map(|r| r.lane.as_str()).collect();
    assert_eq!(failed, vec!["scout"]);
    assert!(!dir.path().join("agent_scout_kb.csv").exists());
    assert!(dir.path().join("agent_gm_kb.csv").exists());

    match &summary.lanes[2].outcome {
        LaneOutcome::Failed { reason } => assert!(reason.contains("next gen stats unavailable")),
        other => panic!("Expected scout failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_write_failure_is_isolated() {
    let dir = tempdir().unwrap();
    // A directory where the file should go makes that one write fail
    fs::create_dir(dir.path().join("agent_gm_kb.csv")).unwrap();

    let summary = run_pipeline(&full_source(), Season::new(2023), &default_lanes(), dir.path())
        .await
        .unwrap();

    let failed: Vec<&str> = summary.failures().map(|r| r.lane.as_str()).collect();
    assert_eq!(failed, vec!["gm"]);
    assert!(dir.path().join("agent_fantasy_kb.csv").exists());
}

#[tokio::test]
async fn test_each_stage_fetched_once() {
    let source = full_source();

    let frames = load_stages(&source, Season::new(2023), &default_lanes()).await;

    assert_eq!(frames.len(), 4);
    assert_eq!(source.calls("pbp"), 1);
    assert_eq!(source.calls("ngs"), 3);
    assert_eq!(source.calls("contracts"), 1);
    assert_eq!(source.calls("player_stats"), 1);
}

#[tokio::test]
async fn test_unused_stages_are_not_fetched() {
    let source = full_source();
    let lanes = vec![LaneSpec::new("gm", "gm.csv", Stage::Contracts)
        .predicate(RowPredicate::IsTrue("is_active".to_string()))];

    let frames = load_stages(&source, Season::new(2023), &lanes).await;

    assert_eq!(frames.len(), 1);
    assert_eq!(source.total_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_summary_json_lists_every_lane() {
    let dir = tempdir().unwrap();
    let source = MemorySource {
        contracts: None,
        ..full_source()
    };

    let summary = run_pipeline(&source, Season::new(2023), &default_lanes(), dir.path())
        .await
        .unwrap();
    let path = summary.write_json().unwrap();
    assert_eq!(path, dir.path().join(SUMMARY_FILE));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(json["season"], 2023);

    let lanes = json["lanes"].as_array().unwrap();
    assert_eq!(lanes.len(), 5);
    assert_eq!(lanes[0]["lane"], "analytics");
    assert_eq!(lanes[0]["status"], "exported");
    assert_eq!(lanes[0]["rows"], 2);
    assert_eq!(lanes[3]["lane"], "gm");
    assert_eq!(lanes[3]["status"], "failed");
    assert_eq!(lanes[3]["stage"], "contracts");
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    let dir = tempdir().unwrap();
    let source = full_source();

    run_pipeline(&source, Season::new(2023), &default_lanes(), dir.path())
        .await
        .unwrap();
    let first = fs::read_to_string(dir.path().join("agent_analytics_kb.csv")).unwrap();

    run_pipeline(&source, Season::new(2023), &default_lanes(), dir.path())
        .await
        .unwrap();
    let second = fs::read_to_string(dir.path().join("agent_analytics_kb.csv")).unwrap();

    assert_eq!(first, second);
}

/// Parses each stage from CSV text, the way downloaded assets arrive.
struct RawCsvSource {
    play_by_play: &'static str,
    next_gen: &'static str,
    contracts: &'static str,
    player_stats: &'static str,
}

impl RawCsvSource {
    fn parse(text: &str) -> Result<Arc<DataFrame>> {
        Ok(Arc::new(parse_csv_bytes(text.as_bytes())?))
    }
}

impl SourceAdapter for RawCsvSource {
    async fn load_play_by_play(&self, _season: Season) -> Result<Arc<DataFrame>> {
        Self::parse(self.play_by_play)
    }

    async fn load_next_gen_stats(&self, _stat_type: StatType, _season: Season) -> Result<Arc<DataFrame>> {
        Self::parse(self.next_gen)
    }

    async fn load_contracts(&self) -> Result<Arc<DataFrame>> {
        Self::parse(self.contracts)
    }

    async fn load_player_stats(&self, _season: Season) -> Result<Arc<DataFrame>> {
        Self::parse(self.player_stats)
    }
}

const RAW_PBP: &str = "game_id,week,play_type,epa,wpa,desc,yards_gained\n\
2023_01_DET_KC,01, pass  ,1.0,0.50,\"(15:00) P.Mahomes pass, short\",1e3\n\
2023_01_DET_KC,1,no_play,NA,,Timeout #1 by DET,NA\n\
2023_01_DET_KC,1,run,-0.000,TRUE,  I.Pacheco left end  ,-2\n";

const RAW_NGS: &str = "season,player_display_name,avg_separation\n2023,Travis Kelce,3.10\n";

const RAW_CONTRACTS: &str = "player,is_active,apy\n\
Patrick Mahomes,TRUE,45.0\n\
Tom Brady,FALSE,1\n\
Travis Kelce,true,0.50\n";

const RAW_PLAYER_STATS: &str = "player_id,player_name,passing_yards,fantasy_points\n\
00-0033873,P.Mahomes,4183.0,NA\n";

fn raw_source() -> RawCsvSource {
    RawCsvSource {
        play_by_play: RAW_PBP,
        next_gen: RAW_NGS,
        contracts: RAW_CONTRACTS,
        player_stats: RAW_PLAYER_STATS,
    }
}

#[tokio::test]
async fn test_exported_values_match_source_text() {
    let dir = tempdir().unwrap();

    let summary = run_pipeline(&raw_source(), Season::new(2023), &default_lanes(), dir.path())
        .await
        .unwrap();
    assert!(summary.all_succeeded());

    let (header, rows) = read_csv(&dir.path().join("agent_analytics_kb.csv"));
    assert_eq!(header, vec!["game_id", "week", "play_type", "epa", "wpa"]);
    assert_eq!(
        rows,
        vec![
            vec!["2023_01_DET_KC", "01", " pass  ", "1.0", "0.50"],
            vec!["2023_01_DET_KC", "1", "run", "-0.000", "TRUE"],
        ]
    );

    let (header, rows) = read_csv(&dir.path().join("agent_gruden_kb.csv"));
    assert_eq!(header, vec!["game_id", "week", "desc", "play_type", "yards_gained"]);
    assert_eq!(
        rows,
        vec![
            vec!["2023_01_DET_KC", "01", "(15:00) P.Mahomes pass, short", " pass  ", "1e3"],
            vec!["2023_01_DET_KC", "1", "Timeout #1 by DET", "no_play", "NA"],
            vec!["2023_01_DET_KC", "1", "  I.Pacheco left end  ", "run", "-2"],
        ]
    );

    let (_, rows) = read_csv(&dir.path().join("agent_gm_kb.csv"));
    assert_eq!(
        rows,
        vec![
            vec!["Patrick Mahomes", "TRUE", "45.0"],
            vec!["Travis Kelce", "true", "0.50"],
        ]
    );
}

#[tokio::test]
async fn test_passthrough_lanes_reproduce_source_bytes() {
    let dir = tempdir().unwrap();

    run_pipeline(&raw_source(), Season::new(2023), &default_lanes(), dir.path())
        .await
        .unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("agent_fantasy_kb.csv")).unwrap(),
        RAW_PLAYER_STATS
    );

    // the three splits are the same file here, so stacking repeats its row
    let (header, rows) = read_csv(&dir.path().join("agent_scout_kb.csv"));
    assert_eq!(header, vec!["season", "player_display_name", "avg_separation"]);
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r == &vec!["2023", "Travis Kelce", "3.10"]));
}
