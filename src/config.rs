//! Runtime configuration: CLI values first, then environment, then defaults.

use std::{path::PathBuf, time::Duration};

use crate::{
    core::{default_cache_dir, CacheConfig},
    source::NFLVERSE_RELEASES_URL,
};

pub const OUTPUT_DIR_ENV_VAR: &str = "NFL_KB_OUTPUT_DIR";
pub const CACHE_DIR_ENV_VAR: &str = "NFL_KB_CACHE_DIR";
pub const BASE_URL_ENV_VAR: &str = "NFL_KB_BASE_URL";

/// Output directory used when neither flag nor environment names one.
pub const DEFAULT_OUTPUT_DIR: &str = "data";

fn env_value(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

/// `--output-dir`, else `NFL_KB_OUTPUT_DIR`, else `data`.
pub fn resolve_output_dir(cli: Option<PathBuf>) -> PathBuf {
    output_dir_from(cli, env_value(OUTPUT_DIR_ENV_VAR))
}

fn output_dir_from(cli: Option<PathBuf>, env: Option<String>) -> PathBuf {
    cli.or_else(|| env.map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
}

/// `--cache-dir`, else `NFL_KB_CACHE_DIR`, else the platform cache dir.
pub fn resolve_cache_dir(cli: Option<PathBuf>) -> PathBuf {
    cache_dir_from(cli, env_value(CACHE_DIR_ENV_VAR))
}

fn cache_dir_from(cli: Option<PathBuf>, env: Option<String>) -> PathBuf {
    cli.or_else(|| env.map(PathBuf::from))
        .unwrap_or_else(default_cache_dir)
}

/// Cache settings from the command line. `--refresh` treats every disk entry
/// as expired; otherwise `--max-age-hours` overrides the default max age.
pub fn resolve_cache_config(
    cli_dir: Option<PathBuf>,
    no_cache: bool,
    max_age_hours: Option<u64>,
    refresh: bool,
) -> CacheConfig {
    let config = CacheConfig::new(resolve_cache_dir(cli_dir), !no_cache);
    if refresh {
        return config.with_max_age(Some(Duration::ZERO));
    }
    match max_age_hours {
        Some(hours) => {
            config.with_max_age(Some(Duration::from_secs(hours.saturating_mul(60 * 60))))
        }
        None => config,
    }
}

/// `--base-url`, else `NFL_KB_BASE_URL`, else the nflverse release root.
pub fn resolve_base_url(cli: Option<String>) -> String {
    base_url_from(cli, env_value(BASE_URL_ENV_VAR))
}

fn base_url_from(cli: Option<String>, env: Option<String>) -> String {
    cli.or(env)
        .unwrap_or_else(|| NFLVERSE_RELEASES_URL.to_string())
}
