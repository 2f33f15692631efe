//! Core data structures and types for the results pipeline.
//!
//! Defines the selection enums (federation, sex, equipment, lift), load
//! statistics, and the row-shaped views renderers consume.

use crate::constants::columns;
use crate::error::{LiftError, Result};
use crate::schema::{date_days, f64_column, str_column};
use chrono::NaiveDate;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Federations with a known weight-class scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Federation {
    #[serde(rename = "IPF")]
    Ipf,
    #[serde(rename = "WRPF")]
    Wrpf,
}

impl Federation {
    pub const ALL: [Federation; 2] = [Federation::Ipf, Federation::Wrpf];

    pub fn as_str(&self) -> &'static str {
        match self {
            Federation::Ipf => "IPF",
            Federation::Wrpf => "WRPF",
        }
    }
}

impl fmt::Display for Federation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Federation {
    type Err = LiftError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IPF" => Ok(Federation::Ipf),
            "WRPF" => Ok(Federation::Wrpf),
            _ => Err(LiftError::invalid_value("federation", s)),
        }
    }
}

/// Competition sex categories kept by the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    /// Code used in the `Sex` column of the source data
    pub fn code(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }

    /// Parse the exact code found in the data (`M` / `F`)
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "M" => Some(Sex::Male),
            "F" => Some(Sex::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Sex {
    type Err = LiftError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "male" | "men" => Ok(Sex::Male),
            "f" | "female" | "women" => Ok(Sex::Female),
            _ => Err(LiftError::invalid_value("sex", s)),
        }
    }
}

/// Equipment categories as written in the `Equipment` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Equipment {
    Raw,
    Wraps,
    #[serde(rename = "Single-ply")]
    SinglePly,
    #[serde(rename = "Multi-ply")]
    MultiPly,
}

impl Equipment {
    pub const ALL: [Equipment; 4] = [
        Equipment::Raw,
        Equipment::Wraps,
        Equipment::SinglePly,
        Equipment::MultiPly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Equipment::Raw => "Raw",
            Equipment::Wraps => "Wraps",
            Equipment::SinglePly => "Single-ply",
            Equipment::MultiPly => "Multi-ply",
        }
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Equipment {
    type Err = LiftError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(Equipment::Raw),
            "wraps" => Ok(Equipment::Wraps),
            "single-ply" | "singleply" | "single" => Ok(Equipment::SinglePly),
            "multi-ply" | "multiply" | "multi" => Ok(Equipment::MultiPly),
            _ => Err(LiftError::invalid_value("equipment", s)),
        }
    }
}

/// Metrics a leaderboard can rank by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lift {
    SquatBest,
    BenchBest,
    DeadliftBest,
    Total,
    Wilks,
}

impl Lift {
    pub const ALL: [Lift; 5] = [
        Lift::SquatBest,
        Lift::BenchBest,
        Lift::DeadliftBest,
        Lift::Total,
        Lift::Wilks,
    ];

    /// Column holding this metric
    pub fn column(&self) -> &'static str {
        match self {
            Lift::SquatBest => columns::SQUAT_BEST,
            Lift::BenchBest => columns::BENCH_BEST,
            Lift::DeadliftBest => columns::DEADLIFT_BEST,
            Lift::Total => columns::TOTAL,
            Lift::Wilks => columns::WILKS,
        }
    }

    /// Attempt columns backing a best-of value, if the metric has attempts
    pub fn attempt_columns(&self) -> Option<[&'static str; 3]> {
        match self {
            Lift::SquatBest => Some([columns::SQUAT_1, columns::SQUAT_2, columns::SQUAT_3]),
            Lift::BenchBest => Some([columns::BENCH_1, columns::BENCH_2, columns::BENCH_3]),
            Lift::DeadliftBest => Some([
                columns::DEADLIFT_1,
                columns::DEADLIFT_2,
                columns::DEADLIFT_3,
            ]),
            Lift::Total | Lift::Wilks => None,
        }
    }

    /// Human-readable title
    pub fn title(&self) -> &'static str {
        match self {
            Lift::SquatBest => "Squat",
            Lift::BenchBest => "Bench",
            Lift::DeadliftBest => "Deadlift",
            Lift::Total => "Total",
            Lift::Wilks => "Wilks",
        }
    }
}

impl fmt::Display for Lift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Lift {
    type Err = LiftError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "squat" | "squatbest" => Ok(Lift::SquatBest),
            "bench" | "benchbest" => Ok(Lift::BenchBest),
            "deadlift" | "deadliftbest" => Ok(Lift::DeadliftBest),
            "total" => Ok(Lift::Total),
            "wilks" => Ok(Lift::Wilks),
            _ => Err(LiftError::invalid_value("lift", s)),
        }
    }
}

/// Row counts recorded while loading the base table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    pub rows_read: usize,
    pub dropped_event: usize,
    pub dropped_sex: usize,
    pub dropped_incomplete: usize,
    pub rows_kept: usize,
}

/// One competition entry, materialized from a table row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiftRecord {
    pub name: String,
    pub sex: String,
    pub event: Option<String>,
    pub equipment: Option<String>,
    pub age: Option<f64>,
    pub bodyweight: Option<f64>,
    pub weight_class: Option<String>,
    pub country: Option<String>,
    pub federation: Option<String>,
    pub parent_federation: Option<String>,
    pub meet: Option<String>,
    pub date: Option<NaiveDate>,
    pub squat: [Option<f64>; 3],
    pub squat_best: Option<f64>,
    pub bench: [Option<f64>; 3],
    pub bench_best: Option<f64>,
    pub deadlift: [Option<f64>; 3],
    pub deadlift_best: Option<f64>,
    pub total: Option<f64>,
    pub wilks: Option<f64>,
}

/// A single meet on an athlete's progression chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressPoint {
    pub date: Option<NaiveDate>,
    pub meet: Option<String>,
    pub best: Option<f64>,
    pub attempts: Option<[Option<f64>; 3]>,
}

/// Days between 0001-01-01 and the Unix epoch in the proleptic Gregorian calendar
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Convert a polars `Date` physical value (days since the Unix epoch)
pub fn date_from_epoch_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
}

/// Materialize every row of a pipeline table as a [`LiftRecord`].
///
/// The table must carry the full logical column set, which holds for the
/// loader's output and everything derived from it.
pub fn records(df: &DataFrame) -> Result<Vec<LiftRecord>> {
    let name = str_column(df, columns::NAME)?;
    let sex = str_column(df, columns::SEX)?;
    let event = str_column(df, columns::EVENT)?;
    let equipment = str_column(df, columns::EQUIPMENT)?;
    let weight_class = str_column(df, columns::WEIGHT_CLASS)?;
    let country = str_column(df, columns::COUNTRY)?;
    let federation = str_column(df, columns::FEDERATION)?;
    let parent_federation = str_column(df, columns::PARENT_FEDERATION)?;
    let meet = str_column(df, columns::MEET)?;
    let age = f64_column(df, columns::AGE)?;
    let bodyweight = f64_column(df, columns::BODYWEIGHT)?;
    let squat = [
        f64_column(df, columns::SQUAT_1)?,
        f64_column(df, columns::SQUAT_2)?,
        f64_column(df, columns::SQUAT_3)?,
    ];
    let bench = [
        f64_column(df, columns::BENCH_1)?,
        f64_column(df, columns::BENCH_2)?,
        f64_column(df, columns::BENCH_3)?,
    ];
    let deadlift = [
        f64_column(df, columns::DEADLIFT_1)?,
        f64_column(df, columns::DEADLIFT_2)?,
        f64_column(df, columns::DEADLIFT_3)?,
    ];
    let squat_best = f64_column(df, columns::SQUAT_BEST)?;
    let bench_best = f64_column(df, columns::BENCH_BEST)?;
    let deadlift_best = f64_column(df, columns::DEADLIFT_BEST)?;
    let total = f64_column(df, columns::TOTAL)?;
    let wilks = f64_column(df, columns::WILKS)?;
    let dates = date_days(df)?;

    let owned = |value: Option<&str>| value.map(str::to_string);

    Ok((0..df.height())
        .map(|i| LiftRecord {
            name: name.get(i).unwrap_or_default().to_string(),
            sex: sex.get(i).unwrap_or_default().to_string(),
            event: owned(event.get(i)),
            equipment: owned(equipment.get(i)),
            age: age.get(i),
            bodyweight: bodyweight.get(i),
            weight_class: owned(weight_class.get(i)),
            country: owned(country.get(i)),
            federation: owned(federation.get(i)),
            parent_federation: owned(parent_federation.get(i)),
            meet: owned(meet.get(i)),
            date: dates.get(i).and_then(date_from_epoch_days),
            squat: [squat[0].get(i), squat[1].get(i), squat[2].get(i)],
            squat_best: squat_best.get(i),
            bench: [bench[0].get(i), bench[1].get(i), bench[2].get(i)],
            bench_best: bench_best.get(i),
            deadlift: [deadlift[0].get(i), deadlift[1].get(i), deadlift[2].get(i)],
            deadlift_best: deadlift_best.get(i),
            total: total.get(i),
            wilks: wilks.get(i),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_federation_parsing() {
        assert_eq!("IPF".parse::<Federation>().unwrap(), Federation::Ipf);
        assert_eq!(" wrpf ".parse::<Federation>().unwrap(), Federation::Wrpf);
        assert!(matches!(
            "USAPL".parse::<Federation>(),
            Err(LiftError::InvalidValue { kind: "federation", .. })
        ));
    }

    #[test]
    fn test_sex_codes() {
        assert_eq!(Sex::from_code("M"), Some(Sex::Male));
        assert_eq!(Sex::from_code("F"), Some(Sex::Female));
        assert_eq!(Sex::from_code("Mx"), None);
        assert_eq!(Sex::from_code("m"), None);
        assert_eq!("female".parse::<Sex>().unwrap(), Sex::Female);
        assert!("Mx".parse::<Sex>().is_err());
    }

    #[test]
    fn test_equipment_round_trip_names() {
        for equipment in Equipment::ALL {
            assert_eq!(equipment.as_str().parse::<Equipment>().unwrap(), equipment);
        }
        assert!("Unlimited".parse::<Equipment>().is_err());
    }

    #[test]
    fn test_lift_columns_and_aliases() {
        assert_eq!("squat".parse::<Lift>().unwrap().column(), "SquatBest");
        assert_eq!("BenchBest".parse::<Lift>().unwrap(), Lift::BenchBest);
        assert_eq!(Lift::Wilks.column(), "Wilks");
        assert!(Lift::Total.attempt_columns().is_none());
        assert_eq!(
            Lift::DeadliftBest.attempt_columns(),
            Some(["Deadlift1", "Deadlift2", "Deadlift3"])
        );
    }

    #[test]
    fn test_date_from_epoch_days() {
        assert_eq!(
            date_from_epoch_days(0),
            NaiveDate::from_ymd_opt(1970, 1, 1)
        );
        assert_eq!(
            date_from_epoch_days(19_000),
            NaiveDate::from_ymd_opt(2022, 1, 8)
        );
    }
}
