//! Core utilities shared by the sources and commands:
//! - `cache`: asset caching driven by an explicit [`CacheConfig`]

pub mod cache;

pub use cache::{
    clear_cache_dir, default_cache_dir, AssetKey, CacheConfig, CacheKey, SourceCache, DEFAULT_MAX_AGE,
};
