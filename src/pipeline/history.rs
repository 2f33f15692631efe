//! Single-athlete views: meet history, the athlete list, lift progressions.

use crate::constants::columns;
use crate::error::Result;
use crate::models::{Lift, ProgressPoint, date_from_epoch_days};
use crate::schema::{date_days, f64_column, str_column};

use polars::prelude::*;
use std::collections::HashSet;
use tracing::debug;

/// Every entry of `athlete_name` (exact, case-sensitive), most recent first.
///
/// Entries on the same date keep their input order. An unknown name gives an
/// empty table.
pub fn history(table: &DataFrame, athlete_name: &str) -> Result<DataFrame> {
    let matches = str_column(table, columns::NAME)?.equal(athlete_name);
    let entries = table.filter(&matches)?;

    debug!("Found {} entries for '{}'", entries.height(), athlete_name);

    Ok(entries.sort(
        [columns::DATE],
        SortMultipleOptions::default()
            .with_order_descending(true)
            .with_nulls_last(true)
            .with_maintain_order(true),
    )?)
}

/// Distinct athlete names in order of first appearance
pub fn athlete_names(table: &DataFrame) -> Result<Vec<String>> {
    let names = str_column(table, columns::NAME)?;
    let mut seen = HashSet::new();
    Ok(names
        .into_iter()
        .flatten()
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect())
}

/// One point per entry of a history table for the given lift, in table order.
///
/// Squat, bench and deadlift points carry their three attempts.
pub fn lift_progression(history: &DataFrame, lift: Lift) -> Result<Vec<ProgressPoint>> {
    let dates = date_days(history)?;
    let meets = str_column(history, columns::MEET)?;
    let best = f64_column(history, lift.column())?;
    let attempts = match lift.attempt_columns() {
        Some([first, second, third]) => Some([
            f64_column(history, first)?,
            f64_column(history, second)?,
            f64_column(history, third)?,
        ]),
        None => None,
    };

    Ok((0..history.height())
        .map(|row| ProgressPoint {
            date: dates.get(row).and_then(date_from_epoch_days),
            meet: meets.get(row).map(str::to_string),
            best: best.get(row),
            attempts: attempts
                .as_ref()
                .map(|[first, second, third]| [first.get(row), second.get(row), third.get(row)]),
        })
        .collect())
}
