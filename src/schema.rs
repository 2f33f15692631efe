//! Column schema management and header resolution.
//!
//! Declares the logical columns the pipeline consumes, maps each onto the
//! physical header names used by the different export generations, and
//! builds the polars schema the CSV reader applies.

use crate::constants::columns;
use crate::error::{LiftError, Result};
use polars::prelude::*;
use tracing::debug;

/// Semantic type of a logical column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Float,
    Date,
}

impl ColumnKind {
    /// Type the CSV reader parses the raw column as
    fn reader_dtype(&self) -> DataType {
        match self {
            ColumnKind::Float => DataType::Float64,
            // Dates are read as text and parsed in a second step
            ColumnKind::Text | ColumnKind::Date => DataType::String,
        }
    }
}

/// A logical column and the header names it may appear under
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub aliases: &'static [&'static str],
}

const fn spec(
    name: &'static str,
    kind: ColumnKind,
    aliases: &'static [&'static str],
) -> ColumnSpec {
    ColumnSpec {
        name,
        kind,
        aliases,
    }
}

/// Whitelisted columns in output order. Aliases cover the current export
/// naming (`Best3SquatKg`, `BodyweightKg`, ...) next to the legacy names.
pub const LOGICAL_COLUMNS: &[ColumnSpec] = &[
    spec(columns::NAME, ColumnKind::Text, &[]),
    spec(columns::SEX, ColumnKind::Text, &[]),
    spec(columns::EVENT, ColumnKind::Text, &[]),
    spec(columns::EQUIPMENT, ColumnKind::Text, &[]),
    spec(columns::AGE, ColumnKind::Float, &[]),
    spec(columns::BODYWEIGHT, ColumnKind::Float, &["BodyweightKg"]),
    spec(columns::WEIGHT_CLASS, ColumnKind::Text, &["WeightClassKg"]),
    spec(columns::SQUAT_1, ColumnKind::Float, &["Squat1Kg"]),
    spec(columns::SQUAT_2, ColumnKind::Float, &["Squat2Kg"]),
    spec(columns::SQUAT_3, ColumnKind::Float, &["Squat3Kg"]),
    spec(columns::SQUAT_BEST, ColumnKind::Float, &["Best3SquatKg"]),
    spec(columns::BENCH_1, ColumnKind::Float, &["Bench1Kg"]),
    spec(columns::BENCH_2, ColumnKind::Float, &["Bench2Kg"]),
    spec(columns::BENCH_3, ColumnKind::Float, &["Bench3Kg"]),
    spec(columns::BENCH_BEST, ColumnKind::Float, &["Best3BenchKg"]),
    spec(columns::DEADLIFT_1, ColumnKind::Float, &["Deadlift1Kg"]),
    spec(columns::DEADLIFT_2, ColumnKind::Float, &["Deadlift2Kg"]),
    spec(columns::DEADLIFT_3, ColumnKind::Float, &["Deadlift3Kg"]),
    spec(columns::DEADLIFT_BEST, ColumnKind::Float, &["Best3DeadliftKg"]),
    spec(columns::TOTAL, ColumnKind::Float, &["TotalKg"]),
    spec(columns::WILKS, ColumnKind::Float, &[]),
    spec(columns::COUNTRY, ColumnKind::Text, &[]),
    spec(columns::FEDERATION, ColumnKind::Text, &[]),
    spec(columns::PARENT_FEDERATION, ColumnKind::Text, &[]),
    spec(columns::DATE, ColumnKind::Date, &[]),
    spec(columns::MEET, ColumnKind::Text, &["MeetName"]),
];

/// A logical column bound to the physical header name present in a file
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedColumn {
    pub logical: &'static str,
    pub physical: String,
    pub kind: ColumnKind,
}

/// Split a CSV header line into trimmed, unquoted column names
pub fn parse_header_line(line: &str) -> Vec<String> {
    line.trim_start_matches('\u{feff}')
        .trim_end_matches(['\r', '\n'])
        .split(',')
        .map(|name| name.trim().trim_matches('"').to_string())
        .collect()
}

/// Bind every logical column to a header name, failing on the first gap
pub fn resolve_columns(header: &[String], origin: &str) -> Result<Vec<ResolvedColumn>> {
    LOGICAL_COLUMNS
        .iter()
        .map(|spec| {
            let physical = std::iter::once(spec.name)
                .chain(spec.aliases.iter().copied())
                .find(|candidate| header.iter().any(|name| name == candidate))
                .ok_or_else(|| LiftError::SchemaMismatch {
                    origin: origin.to_string(),
                    column: spec.name.to_string(),
                })?;

            if physical != spec.name {
                debug!("Column '{}' read from header '{}'", spec.name, physical);
            }

            Ok(ResolvedColumn {
                logical: spec.name,
                physical: physical.to_string(),
                kind: spec.kind,
            })
        })
        .collect()
}

/// Schema overwrite for the CSV reader, keyed by physical names
pub fn reader_schema(resolved: &[ResolvedColumn]) -> Schema {
    Schema::from_iter(
        resolved
            .iter()
            .map(|column| Field::new(column.physical.as_str().into(), column.kind.reader_dtype())),
    )
}

/// Borrow a string column of a pipeline table
pub(crate) fn str_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked> {
    Ok(df.column(name)?.as_materialized_series().str()?)
}

/// Borrow a float column of a pipeline table
pub(crate) fn f64_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Float64Chunked> {
    Ok(df.column(name)?.as_materialized_series().f64()?)
}

/// Physical day numbers of the `Date` column
pub(crate) fn date_days(df: &DataFrame) -> Result<Int32Chunked> {
    let days = df
        .column(columns::DATE)?
        .as_materialized_series()
        .cast(&DataType::Int32)?;
    Ok(days.i32()?.clone())
}
