//! Two-tier cache for downloaded source assets.
//!
//! - L1: in-memory LRU of parsed frames, shared as `Arc<DataFrame>`
//! - L2: raw downloaded bytes on disk under [`CacheConfig::dir`], trusted
//!   until they are older than [`CacheConfig::max_age`]
//!
//! Caching behaviour is fully described by a [`CacheConfig`] value that the
//! caller passes in; nothing here reads global state.

use lru::LruCache;
use std::{
    fs,
    hash::Hash,
    io::{Read, Write},
    num::NonZeroUsize,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};
use tracing::{debug, info};

use polars::prelude::DataFrame;

use crate::{error::KbError, Result};

/// Default number of parsed frames kept in memory.
pub const DEFAULT_MEMORY_CAPACITY: usize = 16;

/// nflverse rebuilds in-season assets nightly.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(12 * 60 * 60);

/// Where cached assets live, whether the cache is consulted at all, and how
/// long a file on disk stays fresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    pub dir: PathBuf,
    pub enabled: bool,
    /// Disk entries older than this are downloaded again. `None` never expires.
    pub max_age: Option<Duration>,
}

impl CacheConfig {
    pub fn new(dir: impl Into<PathBuf>, enabled: bool) -> Self {
        Self {
            dir: dir.into(),
            enabled,
            max_age: Some(DEFAULT_MAX_AGE),
        }
    }

    pub fn with_max_age(mut self, max_age: Option<Duration>) -> Self {
        self.max_age = max_age;
        self
    }

    /// Never read from or write to the cache.
    pub fn disabled() -> Self {
        Self::new(default_cache_dir(), false)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(default_cache_dir(), true)
    }
}

/// Path: ~/.cache/nfl-kb
pub fn default_cache_dir() -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    });
    base.join("nfl-kb")
}

/// Try to read a file into bytes
pub fn try_read_bytes(path: &Path) -> Option<Vec<u8>> {
    let mut f = fs::File::open(path).ok()?;
    let mut buf = Vec::new();

    f.read_to_end(&mut buf).ok()?;

    Some(buf)
}

/// Time since `path` was last written. `None` if the file is missing or the
/// platform has no modification times.
pub fn file_age(path: &Path) -> Option<Duration> {
    fs::metadata(path).ok()?.modified().ok()?.elapsed().ok()
}

/// Write bytes to file, creating parent directories
pub fn write_bytes(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents)
}

/// Key that can be used for both memory and disk caching
pub trait CacheKey: Hash + Eq + Clone + Send + Sync {
    /// String representation for file system storage
    fn to_file_key(&self) -> String;

    /// File path for this cache entry under `base`
    fn to_file_path(&self, base: &Path) -> PathBuf {
        base.join(self.to_file_key())
    }
}

/// Cache key for one downloadable asset, identified by its release path or URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetKey {
    pub asset: String,
}

impl AssetKey {
    pub fn new(asset: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
        }
    }
}

impl CacheKey for AssetKey {
    fn to_file_key(&self) -> String {
        let trimmed = self
            .asset
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.asset);

        trimmed
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '?' | '&' | '=' => '_',
                c => c,
            })
            .collect()
    }
}

/// Memory + disk cache for source assets.
pub struct SourceCache {
    config: CacheConfig,
    frames: Mutex<LruCache<AssetKey, Arc<DataFrame>>>,
    memory_capacity: usize,
}

impl SourceCache {
    pub fn new(config: CacheConfig, memory_capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(memory_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            config,
            frames: Mutex::new(LruCache::new(capacity)),
            memory_capacity: capacity.get(),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<AssetKey, Arc<DataFrame>>> {
        self.frames.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Parsed frame from memory, if caching is enabled.
    pub fn get_frame(&self, key: &AssetKey) -> Option<Arc<DataFrame>> {
        if !self.config.enabled {
            return None;
        }
        self.lock().get(key).cloned()
    }

    pub fn put_frame(&self, key: AssetKey, frame: Arc<DataFrame>) {
        if self.config.enabled {
            self.lock().put(key, frame);
        }
    }

    /// Raw asset bytes from disk, if caching is enabled and the file is
    /// younger than the configured max age.
    pub fn read_bytes(&self, key: &AssetKey) -> Option<Vec<u8>> {
        if !self.config.enabled {
            return None;
        }
        let path = key.to_file_path(&self.config.dir);
        if let (Some(max_age), Some(age)) = (self.config.max_age, file_age(&path)) {
            if age > max_age {
                debug!(path = %path.display(), age_secs = age.as_secs(), "disk cache entry expired");
                return None;
            }
        }
        let bytes = try_read_bytes(&path)?;
        debug!(path = %path.display(), "disk cache hit");
        Some(bytes)
    }

    pub fn write_bytes(&self, key: &AssetKey, bytes: &[u8]) -> Result<()> {
        if !self.config.enabled {
            return Ok(());
        }
        let path = key.to_file_path(&self.config.dir);
        write_bytes(&path, bytes).map_err(|e| KbError::Cache {
            message: format!("writing {}: {e}", path.display()),
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), "cached asset");
        Ok(())
    }

    /// Clear memory cache only (keeps disk cache)
    pub fn clear_memory(&self) {
        self.lock().clear();
    }

    /// Clear memory and delete the cache directory
    pub fn clear_all(&self) -> Result<()> {
        self.clear_memory();
        clear_cache_dir(&self.config.dir)
    }

    /// (entries, capacity) of the memory tier
    pub fn memory_stats(&self) -> (usize, usize) {
        (self.lock().len(), self.memory_capacity)
    }
}

/// Remove the cache directory and everything in it. Missing directories are fine.
pub fn clear_cache_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir)?;
        info!(dir = %dir.display(), "cleared cache");
    }
    Ok(())
}
