//! Per-weight-class leaderboards.
//!
//! An athlete appears at most once per class, with the entry holding their
//! best value of the chosen lift in that class. Athletes are identified by
//! name only: the export has no person identifier, so namesakes merge.

use crate::constants::columns;
use crate::error::{LiftError, Result};
use crate::models::{Lift, Sex};
use crate::schema::{date_days, f64_column, str_column};
use crate::weight_class::compare_labels;

use polars::prelude::*;
use std::cmp::Ordering;
use std::collections::{BTreeMap, btree_map};
use tracing::debug;

/// A candidate row and the values it is ranked on
#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    row: usize,
    class: &'a str,
    name: &'a str,
    value: f64,
    date: Option<i32>,
}

/// Earlier dates first, undated entries last
fn compare_dates(a: Option<i32>, b: Option<i32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl Candidate<'_> {
    /// Order among one athlete's entries: best value, then earliest meet
    fn personal_best_order(&self, other: &Self) -> Ordering {
        other
            .value
            .total_cmp(&self.value)
            .then_with(|| compare_dates(self.date, other.date))
            .then_with(|| self.row.cmp(&other.row))
    }

    /// Order within a class: best value, then name, then earliest meet
    fn ranking_order(&self, other: &Self) -> Ordering {
        other
            .value
            .total_cmp(&self.value)
            .then_with(|| self.name.cmp(other.name))
            .then_with(|| compare_dates(self.date, other.date))
            .then_with(|| self.row.cmp(&other.row))
    }
}

/// Top `top_n` athletes per weight class for one sex and lift.
///
/// Output has one row per (class, athlete), classes from lightest to
/// heaviest, each class ranked by the lift descending. Rows lacking a class,
/// a name or a value for the lift are ignored. For fixed input the output is
/// identical on every call.
pub fn best_per_weightclass(
    cleaned: &DataFrame,
    lift: Lift,
    sex: Sex,
    top_n: usize,
) -> Result<DataFrame> {
    if top_n == 0 {
        return Err(LiftError::configuration(
            "lifters per class must be at least 1",
        ));
    }

    let same_sex = str_column(cleaned, columns::SEX)?.equal(sex.code());
    let subset = cleaned.filter(&same_sex)?;

    let classes = str_column(&subset, columns::WEIGHT_CLASS)?;
    let names = str_column(&subset, columns::NAME)?;
    let values = f64_column(&subset, lift.column())?;
    let dates = date_days(&subset)?;

    let candidates = (0..subset.height()).filter_map(|row| {
        Some(Candidate {
            row,
            class: classes.get(row)?,
            name: names.get(row)?,
            value: values.get(row).filter(|value| !value.is_nan())?,
            date: dates.get(row),
        })
    });

    let mut personal_bests: BTreeMap<(&str, &str), Candidate> = BTreeMap::new();
    for candidate in candidates {
        match personal_bests.entry((candidate.class, candidate.name)) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
            btree_map::Entry::Occupied(mut slot) => {
                if candidate.personal_best_order(slot.get()) == Ordering::Less {
                    slot.insert(candidate);
                }
            }
        }
    }

    let mut by_class: BTreeMap<&str, Vec<Candidate>> = BTreeMap::new();
    for ((class, _), candidate) in personal_bests {
        by_class.entry(class).or_default().push(candidate);
    }

    let mut ranked: Vec<(&str, Vec<Candidate>)> = by_class.into_iter().collect();
    ranked.sort_by(|(a, _), (b, _)| compare_labels(a, b));

    let mut rows: Vec<IdxSize> = Vec::new();
    for (class, mut athletes) in ranked {
        athletes.sort_by(|a, b| a.ranking_order(b));
        athletes.truncate(top_n);
        debug!("Class {}: keeping {} athletes", class, athletes.len());
        rows.extend(athletes.iter().map(|athlete| athlete.row as IdxSize));
    }

    let indices = IdxCa::from_vec(PlSmallStr::EMPTY, rows);
    Ok(subset.take(&indices)?)
}
