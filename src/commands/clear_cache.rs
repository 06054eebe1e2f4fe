//! Remove downloaded assets.

use std::path::PathBuf;

use crate::{config::resolve_cache_dir, core::clear_cache_dir, Result};

pub fn handle_clear_cache(cache_dir: Option<PathBuf>) -> Result<PathBuf> {
    let dir = resolve_cache_dir(cache_dir);
    clear_cache_dir(&dir)?;
    println!("✓ Cleared cache at {}", dir.display());
    Ok(dir)
}
