//! HTTP source backed by nflverse release assets.

use polars::prelude::*;
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{csv_frame::parse_csv_bytes, dataset::Dataset, SourceAdapter};
use crate::{
    core::{AssetKey, CacheConfig, SourceCache},
    core::cache::DEFAULT_MEMORY_CAPACITY,
    error::KbError,
    frame::{has_column, numeric, stack},
    Result, Season, StatType,
};

/// Loads nflverse datasets over HTTP, consulting the cache first.
pub struct NflverseSource {
    client: Client,
    base_url: String,
    cache: SourceCache,
}

impl NflverseSource {
    pub fn new(base_url: impl Into<String>, cache: CacheConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("nfl-kb/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, base_url, cache))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>, cache: CacheConfig) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache: SourceCache::new(cache, DEFAULT_MEMORY_CAPACITY),
        }
    }

    pub fn cache(&self) -> &SourceCache {
        &self.cache
    }

    /// Absolute URL for a release-relative asset path.
    pub fn asset_url(&self, asset: &str) -> String {
        if asset.starts_with("http://") || asset.starts_with("https://") {
            asset.to_string()
        } else {
            format!("{}/{}", self.base_url, asset.trim_start_matches('/'))
        }
    }

    /// Load a dataset for the given seasons.
    ///
    /// Seasonal datasets fetch one asset per season and stack them. Datasets
    /// published as a single file are restricted to `seasons` through their
    /// `season` column when one exists; an empty `seasons` keeps everything.
    pub async fn load(
        &self,
        dataset: Dataset,
        seasons: &[Season],
        stat_type: Option<StatType>,
    ) -> Result<Arc<DataFrame>> {
        info!(%dataset, ?seasons, "loading dataset");

        if dataset.is_seasonal() {
            let mut parts = Vec::with_capacity(seasons.len());
            for season in seasons {
                let asset = dataset.asset(Some(*season), stat_type)?;
                parts.push(self.fetch_asset(&asset).await?);
            }
            return match parts.len() {
                0 => Err(KbError::MissingSeason {
                    dataset: dataset.name().to_string(),
                }),
                1 => Ok(parts.remove(0)),
                _ => {
                    let frames: Vec<DataFrame> = parts.iter().map(|f| f.as_ref().clone()).collect();
                    Ok(Arc::new(stack(&frames)?))
                }
            };
        }

        let frame = self.fetch_asset(&dataset.asset(None, stat_type)?).await?;
        if seasons.is_empty() || !has_column(&frame, "season") {
            return Ok(frame);
        }
        Ok(Arc::new(filter_seasons(&frame, seasons)?))
    }

    /// Fetch and parse one asset: memory cache, then disk cache, then network.
    pub async fn fetch_asset(&self, asset: &str) -> Result<Arc<DataFrame>> {
        let key = AssetKey::new(asset);
        if let Some(frame) = self.cache.get_frame(&key) {
            debug!(asset, "memory cache hit");
            return Ok(frame);
        }

        let bytes = match self.cache.read_bytes(&key) {
            Some(bytes) => bytes,
            None => {
                let bytes = self.download(asset).await?;
                if let Err(e) = self.cache.write_bytes(&key, &bytes) {
                    warn!(asset, error = %e, "could not write asset to cache");
                }
                bytes
            }
        };

        let frame = Arc::new(parse_csv_bytes(&bytes)?);
        debug!(asset, rows = frame.height(), columns = frame.width(), "parsed asset");
        self.cache.put_frame(key, Arc::clone(&frame));
        Ok(frame)
    }

    async fn download(&self, asset: &str) -> Result<Vec<u8>> {
        let url = self.asset_url(asset);
        info!(%url, "downloading");

        let bytes = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        Ok(bytes.to_vec())
    }
}

impl SourceAdapter for NflverseSource {
    async fn load_play_by_play(&self, season: Season) -> Result<Arc<DataFrame>> {
        self.load(Dataset::PlayByPlay, &[season], None).await
    }

    async fn load_next_gen_stats(&self, stat_type: StatType, season: Season) -> Result<Arc<DataFrame>> {
        self.load(Dataset::NextGenStats, &[season], Some(stat_type))
            .await
    }

    async fn load_contracts(&self) -> Result<Arc<DataFrame>> {
        self.load(Dataset::Contracts, &[], None).await
    }

    async fn load_player_stats(&self, season: Season) -> Result<Arc<DataFrame>> {
        self.load(Dataset::PlayerSeasonStats, &[season], None).await
    }
}

/// Rows whose `season` reads as one of `seasons`.
pub fn filter_seasons(frame: &DataFrame, seasons: &[Season]) -> Result<DataFrame> {
    let wanted = seasons
        .iter()
        .map(|season| numeric("season").eq(lit(f64::from(season.as_u16()))))
        .reduce(|acc, next| acc.or(next))
        .unwrap_or_else(|| lit(false));

    Ok(frame.clone().lazy().filter(wanted).collect()?)
}
