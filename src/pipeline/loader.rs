//! Dataset loading.
//!
//! Reads the results export, keeps the whitelisted columns under their
//! logical names with their semantic types, and applies the universal
//! filters: full-power event, supported sex, complete results.

use super::Dataset;
use crate::constants::{DATE_FORMAT, FULL_POWER_EVENT, columns};
use crate::error::{LiftError, Result};
use crate::models::{LoadStats, Sex};
use crate::schema::{
    ColumnKind, ResolvedColumn, parse_header_line, reader_schema, resolve_columns, str_column,
};

use polars::io::mmap::MmapBytesReader;
use polars::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Seek, SeekFrom};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Load the base dataset from a CSV export on disk.
///
/// The file is opened once and closed before returning, on success or error.
/// Failures to open or read it are `SourceUnavailable`; content problems keep
/// their own variant.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let file = File::open(path).map_err(|source| LiftError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let origin = path.display().to_string();

    let (table, stats) = read_results(file, &origin).map_err(|e| match e {
        LiftError::Io(source) => LiftError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;

    Ok(Dataset::from_frame(table, origin, stats))
}

/// Load the base dataset from an in-memory export
pub fn load_dataset_from_bytes(bytes: Vec<u8>, origin: &str) -> Result<Dataset> {
    load_dataset_from_reader(Cursor::new(bytes), origin)
}

/// Load the base dataset from any seekable byte source, such as an open file
pub fn load_dataset_from_reader<R: MmapBytesReader>(reader: R, origin: &str) -> Result<Dataset> {
    let (table, stats) = read_results(reader, origin)?;
    Ok(Dataset::from_frame(table, origin, stats))
}

/// Read, type and filter an export from any seekable source
fn read_results<R: MmapBytesReader>(mut reader: R, origin: &str) -> Result<(DataFrame, LoadStats)> {
    let header = read_header(&mut reader, origin)?;
    let resolved = resolve_columns(&header, origin)?;

    let typed = read_typed_columns(reader, &resolved)?;
    let (table, stats) = apply_universal_filters(typed)?;

    info!(
        "Loaded {} of {} rows from {}",
        stats.rows_kept, stats.rows_read, origin
    );
    if stats.rows_kept == 0 && stats.rows_read > 0 {
        warn!("No rows of {} survived filtering", origin);
    }

    Ok((table, stats))
}

/// Read the header line, then rewind so the CSV reader sees the whole source.
///
/// Only read failures surface as `Io`; undecodable bytes are a format error.
fn read_header<R: MmapBytesReader>(reader: &mut R, origin: &str) -> Result<Vec<String>> {
    let mut raw = Vec::new();
    BufReader::new(&mut *reader).read_until(b'\n', &mut raw)?;
    reader.seek(SeekFrom::Start(0))?;

    let line = String::from_utf8(raw).map_err(|e| LiftError::MalformedSource {
        origin: origin.to_string(),
        reason: format!("header is not valid UTF-8 ({})", e.utf8_error()),
    })?;
    Ok(parse_header_line(&line))
}

/// Parse the whitelisted columns and rename them to their logical names
fn read_typed_columns<R: MmapBytesReader>(
    reader: R,
    resolved: &[ResolvedColumn],
) -> Result<DataFrame> {
    let projection: Arc<[PlSmallStr]> = resolved
        .iter()
        .map(|column| PlSmallStr::from(column.physical.as_str()))
        .collect();

    let raw = CsvReadOptions::default()
        .with_has_header(true)
        .with_columns(Some(projection))
        .with_schema_overwrite(Some(Arc::new(reader_schema(resolved))))
        .into_reader_with_file_handle(reader)
        .finish()?;

    let selection: Vec<Expr> = resolved
        .iter()
        .map(|column| {
            let expr = col(column.physical.as_str());
            let expr = match column.kind {
                ColumnKind::Date => expr.str().to_date(StrptimeOptions {
                    format: Some(DATE_FORMAT.into()),
                    strict: false,
                    ..Default::default()
                }),
                ColumnKind::Text | ColumnKind::Float => expr,
            };
            expr.alias(column.logical)
        })
        .collect();

    Ok(raw.lazy().select(selection).collect()?)
}

/// Event, sex and completeness filters, in that order
fn apply_universal_filters(table: DataFrame) -> Result<(DataFrame, LoadStats)> {
    let rows_read = table.height();

    let full_power = str_column(&table, columns::EVENT)?.equal(FULL_POWER_EVENT);
    let table = table.filter(&full_power)?;
    let after_event = table.height();
    debug!("Event filter kept {} of {} rows", after_event, rows_read);

    let sex = str_column(&table, columns::SEX)?;
    let supported_sex = Sex::ALL
        .iter()
        .fold(BooleanChunked::full(PlSmallStr::EMPTY, false, table.height()), |mask, s| {
            &mask | &sex.equal(s.code())
        });
    let table = table.filter(&supported_sex)?;
    let after_sex = table.height();
    debug!("Sex filter kept {} of {} rows", after_sex, after_event);

    let mut complete = BooleanChunked::full(PlSmallStr::EMPTY, true, table.height());
    for name in columns::REQUIRED_RESULTS {
        let present = table.column(name)?.as_materialized_series().is_not_null();
        complete = &complete & &present;
    }
    let table = table.filter(&complete)?;
    let rows_kept = table.height();
    debug!("Completeness filter kept {} of {} rows", rows_kept, after_sex);

    let stats = LoadStats {
        rows_read,
        dropped_event: rows_read - after_event,
        dropped_sex: after_event - after_sex,
        dropped_incomplete: after_sex - rows_kept,
        rows_kept,
    };

    Ok((table, stats))
}
