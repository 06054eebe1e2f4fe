//! Decoding of downloaded CSV assets into data frames.

use flate2::read::GzDecoder;
use polars::prelude::*;
use std::io::{Cursor, Read};

use crate::Result;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const UTF8_BOM: [u8; 3] = [0xef, 0xbb, 0xbf];

/// Parse CSV bytes (plain or gzip-compressed) into a [`DataFrame`].
///
/// Every column is read as text so cells come back exactly as downloaded:
/// no trimming, no number or boolean coercion. Empty cells are null. Short
/// rows are padded with nulls and extra trailing fields are dropped.
pub fn parse_csv_bytes(bytes: &[u8]) -> Result<DataFrame> {
    let mut decoded = if bytes.starts_with(&GZIP_MAGIC) {
        let mut out = Vec::new();
        GzDecoder::new(bytes).read_to_end(&mut out)?;
        out
    } else {
        bytes.to_vec()
    };
    if decoded.starts_with(&UTF8_BOM) {
        decoded.drain(..UTF8_BOM.len());
    }

    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|options| options.with_truncate_ragged_lines(true))
        .into_reader_with_file_handle(Cursor::new(decoded))
        .finish()?;
    Ok(frame)
}
