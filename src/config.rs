//! Configuration management and validation.
//!
//! Holds the dashboard's selections (federation, equipment, lifters per
//! class, preselected athlete) and where the results export lives.

use crate::constants::{
    DATA_DIR_NAME, DATASET_FILE_PATTERNS, DEFAULT_ATHLETE, DEFAULT_LOG_LEVEL, DEFAULT_TOP_N,
    LOG_LEVELS, MAX_TOP_N,
};
use crate::error::{LiftError, Result};
use crate::models::{Equipment, Federation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Global configuration for the dashboard pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Explicit path to a results export; wins over discovery
    pub data_path: Option<PathBuf>,

    /// Directory searched for downloaded exports
    pub data_dir: PathBuf,

    /// Federation whose weight classes are applied
    pub federation: Federation,

    /// Equipment categories kept by the cleaner
    pub equipment: BTreeSet<Equipment>,

    /// Lifters shown per weight class
    pub top_n: usize,

    /// Athlete preselected in the history view
    pub default_athlete: String,

    /// Level of the crate's log filter, unless `RUST_LOG` is set
    pub log_level: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            data_dir: default_data_dir(),
            federation: Federation::Ipf,
            equipment: BTreeSet::from([Equipment::Raw]),
            top_n: DEFAULT_TOP_N,
            default_athlete: DEFAULT_ATHLETE.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Platform data directory for downloaded exports, falling back to `./data`
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(DATA_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("data"))
}

impl DashboardConfig {
    /// Use a specific export file
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = Some(path.into());
        self
    }

    /// Search a different directory for exports
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_federation(mut self, federation: Federation) -> Self {
        self.federation = federation;
        self
    }

    pub fn with_equipment(mut self, equipment: impl IntoIterator<Item = Equipment>) -> Self {
        self.equipment = equipment.into_iter().collect();
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_default_athlete(mut self, name: impl Into<String>) -> Self {
        self.default_athlete = name.into();
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Filter directive scoping `log_level` to this crate
    pub fn log_directive(&self) -> String {
        format!("{}={}", env!("CARGO_CRATE_NAME"), self.log_level)
    }

    /// Check the selections the dashboard can offer
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(LiftError::configuration(format!(
                "unknown log level '{}', expected one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }
        if self.equipment.is_empty() {
            return Err(LiftError::configuration(
                "at least one equipment category must be selected",
            ));
        }
        if !(1..=MAX_TOP_N).contains(&self.top_n) {
            return Err(LiftError::configuration(format!(
                "lifters per class must be between 1 and {}, got {}",
                MAX_TOP_N, self.top_n
            )));
        }
        Ok(())
    }

    /// Path of the export to load.
    ///
    /// An explicit `data_path` is returned as-is; otherwise the newest
    /// export under `data_dir` is picked (exports carry their date in the
    /// file name, so the lexicographically last one is the newest).
    pub fn resolve_dataset_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.data_path {
            return Ok(path.clone());
        }
        find_latest_export(&self.data_dir)
    }
}

/// Newest results export under `dir`, flat or inside an extracted archive folder
pub fn find_latest_export(dir: &Path) -> Result<PathBuf> {
    if !dir.is_dir() {
        return Err(LiftError::DatasetNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut candidates = Vec::new();
    for pattern in DATASET_FILE_PATTERNS {
        let full_pattern = dir.join(pattern);
        let entries = glob::glob(&full_pattern.to_string_lossy()).map_err(|e| {
            LiftError::configuration(format!("invalid dataset pattern {}: {}", pattern, e))
        })?;
        candidates.extend(entries.filter_map(|entry| entry.ok()).filter(|p| p.is_file()));
    }

    debug!(
        "Found {} candidate exports in {}",
        candidates.len(),
        dir.display()
    );

    candidates
        .into_iter()
        .max_by(|a, b| a.file_name().cmp(&b.file_name()).then_with(|| a.cmp(b)))
        .ok_or_else(|| LiftError::DatasetNotFound {
            path: dir.to_path_buf(),
        })
}
