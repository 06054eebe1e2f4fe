//! Helpers shared by the commands that talk to the upstream source.

use std::path::PathBuf;

use tracing::debug;

use crate::{
    config::{resolve_base_url, resolve_cache_config},
    source::NflverseSource,
    Result,
};

/// Where to download from and how to cache, as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct SourceOptions {
    pub cache_dir: Option<PathBuf>,
    pub no_cache: bool,
    /// Re-download cached assets older than this many hours.
    pub max_age_hours: Option<u64>,
    /// Re-download every asset, then cache the fresh copy.
    pub refresh: bool,
    pub base_url: Option<String>,
}

impl SourceOptions {
    /// Build the HTTP source, filling unset options from the environment.
    pub fn build_source(&self) -> Result<NflverseSource> {
        let cache = resolve_cache_config(
            self.cache_dir.clone(),
            self.no_cache,
            self.max_age_hours,
            self.refresh,
        );
        let base_url = resolve_base_url(self.base_url.clone());
        debug!(
            %base_url,
            cache_dir = %cache.dir.display(),
            cache_enabled = cache.enabled,
            max_age = ?cache.max_age,
            "building source"
        );
        NflverseSource::new(base_url, cache)
    }
}

/// Print a count with its noun, pluralised naively.
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
