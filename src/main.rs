//! Entry point: parse CLI and dispatch to command handlers.

use anyhow::Context;
use clap::Parser;
use nfl_kb::{
    cli::{Commands, NflKb},
    commands::{
        clear_cache::handle_clear_cache,
        fantasy_report::{handle_fantasy_report, FantasyParams},
        fetch_dataset::{handle_fetch_dataset, FetchParams},
        season_info::handle_season_info,
        update_data::{handle_update_data, UpdateParams},
    },
    logging::setup_logging,
};

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = NflKb::parse();
    setup_logging(app.verbose)?;

    match app.command {
        Commands::Update {
            season,
            output_dir,
            strict,
            source,
        } => {
            handle_update_data(UpdateParams {
                season,
                output_dir,
                strict,
                source: source.into(),
            })
            .await
            .with_context(|| format!("update for season {season} failed"))?;
        }

        Commands::Fetch {
            dataset,
            seasons,
            stat_type,
            output_dir,
            source,
        } => {
            handle_fetch_dataset(FetchParams {
                dataset,
                seasons,
                stat_type,
                output_dir,
                source: source.into(),
            })
            .await
            .with_context(|| format!("fetching {dataset} failed"))?;
        }

        Commands::Fantasy {
            seasons,
            output_dir,
            source,
        } => {
            handle_fantasy_report(FantasyParams {
                seasons,
                output_dir,
                source: source.into(),
            })
            .await
            .context("fantasy report failed")?;
        }

        Commands::Season => handle_season_info(),

        Commands::ClearCache { cache_dir } => {
            handle_clear_cache(cache_dir).context("clearing the cache failed")?;
        }
    }

    Ok(())
}
