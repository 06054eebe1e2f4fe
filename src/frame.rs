//! Helpers over polars data frames shared by the sources, lanes and scoring.
//!
//! Frames parsed from downloaded CSV keep every cell as text, so exported
//! values match the download exactly. Numeric and boolean readings are
//! computed only where a predicate or a score needs them.

use polars::prelude::*;

use crate::Result;

#[cfg(test)]
mod tests;

/// Cell text upstream files use for a missing value.
pub const MISSING_TEXT: &str = "NA";

pub fn has_column(frame: &DataFrame, name: &str) -> bool {
    frame.get_column_index(name).is_some()
}

pub fn column_names(frame: &DataFrame) -> Vec<String> {
    frame
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect()
}

/// Float reading of a column. Text is parsed; unparseable cells such as `NA`
/// become null.
pub fn numeric(name: &str) -> Expr {
    col(name).cast(DataType::Float64)
}

/// Rows holding a value in `name`: not null and, for text, neither empty nor `NA`.
/// An absent column holds no values.
pub fn present(frame: &DataFrame, name: &str) -> Expr {
    match frame.column(name).map(|c| c.dtype()) {
        Err(_) => lit(false),
        Ok(DataType::String) => col(name)
            .is_not_null()
            .and(col(name).neq(lit("")))
            .and(col(name).neq(lit(MISSING_TEXT))),
        Ok(_) => col(name).is_not_null(),
    }
}

/// Rows whose `name` reads as true: boolean `true`, text `TRUE`/`true`/`True`,
/// or the number 1. An absent column is never true.
pub fn truthy(frame: &DataFrame, name: &str) -> Expr {
    match frame.column(name).map(|c| c.dtype()) {
        Err(_) => lit(false),
        Ok(DataType::Boolean) => col(name).eq(lit(true)),
        Ok(DataType::String) => col(name)
            .eq(lit("TRUE"))
            .or(col(name).eq(lit("true")))
            .or(col(name).eq(lit("True"))),
        Ok(_) => numeric(name).eq(lit(1.0)),
    }
}

/// Stack frames vertically. Columns are the union in first-seen order; rows
/// from a frame lacking a column read null there.
pub fn stack(frames: &[DataFrame]) -> Result<DataFrame> {
    match frames {
        [] => Ok(DataFrame::empty()),
        [only] => Ok(only.clone()),
        _ => {
            let lazy: Vec<LazyFrame> = frames.iter().map(|f| f.clone().lazy()).collect();
            Ok(concat_lf_diagonal(lazy, UnionArgs::default())?.collect()?)
        }
    }
}

/// Copy of `frame` with `from` renamed to `to`. Unchanged when `from` is
/// absent or `to` already exists.
pub fn rename_column(frame: &DataFrame, from: &str, to: &str) -> Result<DataFrame> {
    let mut out = frame.clone();
    if has_column(frame, from) && !has_column(frame, to) {
        out.rename(from, to.into())?;
    }
    Ok(out)
}

/// Cells of `name` rendered as text, nulls as `None`.
pub fn text_values(frame: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = frame.column(name)?.cast(&DataType::String)?;
    Ok(column
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

/// Cells of `name` read as floats; unparseable cells are `None`.
pub fn float_values(frame: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = frame.column(name)?.cast(&DataType::Float64)?;
    Ok(column.f64()?.into_iter().collect())
}
