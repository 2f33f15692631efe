//! Results pipeline: load once, derive per request.
//!
//! The loader produces the base table, which [`Dataset`] holds behind an
//! `Arc` and never mutates. The cleaner, leaderboard and history stages are
//! plain functions from a borrowed table to a fresh one, so any number of
//! callers can share a `Dataset` without locking.

pub mod cleaner;
pub mod history;
pub mod leaderboard;
pub mod loader;

#[cfg(test)]
pub mod tests;

pub use self::cleaner::{assign_weight_classes, clean};
pub use self::history::{athlete_names, history, lift_progression};
pub use self::leaderboard::best_per_weightclass;
pub use self::loader::{load_dataset, load_dataset_from_bytes, load_dataset_from_reader};

use crate::error::Result;
use crate::models::{Equipment, Federation, Lift, LoadStats, Sex};
use polars::prelude::DataFrame;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

/// Read-only handle on the loaded base table
#[derive(Debug, Clone)]
pub struct Dataset {
    base: Arc<DataFrame>,
    origin: String,
    stats: LoadStats,
}

impl Dataset {
    /// Load and filter a results export from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        load_dataset(path.as_ref())
    }

    /// Wrap an already-loaded base table
    pub fn from_frame(base: DataFrame, origin: impl Into<String>, stats: LoadStats) -> Self {
        Self {
            base: Arc::new(base),
            origin: origin.into(),
            stats,
        }
    }

    /// The base table
    pub fn base(&self) -> &DataFrame {
        &self.base
    }

    /// Shared pointer to the base table, for callers that outlive this handle
    pub fn shared(&self) -> Arc<DataFrame> {
        Arc::clone(&self.base)
    }

    /// Where the base table was read from
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn stats(&self) -> LoadStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.base.height()
    }

    pub fn is_empty(&self) -> bool {
        self.base.height() == 0
    }

    /// Re-bucket, filter by equipment and sort a copy of the base table
    pub fn clean(&self, federation: Federation, equipment: &BTreeSet<Equipment>) -> Result<DataFrame> {
        clean(&self.base, federation, equipment)
    }

    /// Clean for the given selection, then rank the best lifters per class
    pub fn leaderboard(
        &self,
        federation: Federation,
        equipment: &BTreeSet<Equipment>,
        lift: Lift,
        sex: Sex,
        top_n: usize,
    ) -> Result<DataFrame> {
        let cleaned = self.clean(federation, equipment)?;
        best_per_weightclass(&cleaned, lift, sex, top_n)
    }

    /// Every entry of one athlete, most recent first
    pub fn history(&self, athlete_name: &str) -> Result<DataFrame> {
        history(&self.base, athlete_name)
    }

    /// Distinct athlete names in first-appearance order
    pub fn athlete_names(&self) -> Result<Vec<String>> {
        athlete_names(&self.base)
    }
}
