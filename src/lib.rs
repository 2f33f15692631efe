//! Powerlifting Dashboard Library
//!
//! Data pipeline behind a dashboard for OpenPowerlifting competition results.
//!
//! This library provides tools for:
//! - Loading the results export with a fixed, typed column set
//! - Re-bucketing athletes into federation-specific weight classes
//! - Per-weight-class leaderboards of personal bests
//! - Athlete histories and per-lift progressions
//!
//! ```no_run
//! use powerlifting_dashboard::{Dataset, Equipment, Federation, Lift, Sex};
//! use std::collections::BTreeSet;
//!
//! # fn main() -> powerlifting_dashboard::Result<()> {
//! let dataset = Dataset::load("data/openpowerlifting.csv")?;
//! let equipment = BTreeSet::from([Equipment::Raw]);
//! let board = dataset.leaderboard(Federation::Ipf, &equipment, Lift::SquatBest, Sex::Male, 10)?;
//! println!("{}", board);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod schema;
pub mod weight_class;

// Re-export commonly used types
pub use config::DashboardConfig;
pub use error::{LiftError, Result};
pub use models::{Equipment, Federation, Lift, LiftRecord, LoadStats, ProgressPoint, Sex};
pub use pipeline::{
    Dataset, athlete_names, best_per_weightclass, clean, history, lift_progression,
    load_dataset, load_dataset_from_bytes, load_dataset_from_reader,
};
pub use weight_class::{WeightClassScheme, get_weight_classes};
