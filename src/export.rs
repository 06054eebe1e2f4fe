//! CSV serialization of lane frames.

use polars::prelude::*;
use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::Result;

/// Write `frame` to `<dir>/<artifact>`, creating `dir` if needed.
///
/// The header is the frame's column order; null cells are written as empty
/// fields and text cells are written as they are. Returns the written path.
pub fn export_frame(dir: &Path, artifact: &str, frame: &DataFrame) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(artifact);

    let mut file = File::create(&path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut frame.clone())?;

    debug!(path = %path.display(), rows = frame.height(), "wrote csv");
    Ok(path)
}
