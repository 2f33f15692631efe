//! Application constants for the results pipeline
//!
//! Logical column names, the accepted competition format, and default values
//! shared by the library and the CLI.

// =============================================================================
// Logical Column Names
// =============================================================================

/// Logical column names as they appear in every table the pipeline produces
pub mod columns {
    pub const NAME: &str = "Name";
    pub const SEX: &str = "Sex";
    pub const EVENT: &str = "Event";
    pub const EQUIPMENT: &str = "Equipment";
    pub const AGE: &str = "Age";
    pub const BODYWEIGHT: &str = "Bodyweight";
    pub const WEIGHT_CLASS: &str = "WeightClass";
    pub const SQUAT_1: &str = "Squat1";
    pub const SQUAT_2: &str = "Squat2";
    pub const SQUAT_3: &str = "Squat3";
    pub const SQUAT_BEST: &str = "SquatBest";
    pub const BENCH_1: &str = "Bench1";
    pub const BENCH_2: &str = "Bench2";
    pub const BENCH_3: &str = "Bench3";
    pub const BENCH_BEST: &str = "BenchBest";
    pub const DEADLIFT_1: &str = "Deadlift1";
    pub const DEADLIFT_2: &str = "Deadlift2";
    pub const DEADLIFT_3: &str = "Deadlift3";
    pub const DEADLIFT_BEST: &str = "DeadliftBest";
    pub const TOTAL: &str = "Total";
    pub const WILKS: &str = "Wilks";
    pub const COUNTRY: &str = "Country";
    pub const FEDERATION: &str = "Federation";
    pub const PARENT_FEDERATION: &str = "ParentFederation";
    pub const DATE: &str = "Date";
    pub const MEET: &str = "Meet";

    /// Columns that must be non-null for a row to survive loading
    pub const REQUIRED_RESULTS: &[&str] = &[SQUAT_BEST, BENCH_BEST, DEADLIFT_BEST, TOTAL];
}

// =============================================================================
// Loader Settings
// =============================================================================

/// Event code of the full three-lift competition (squat, bench, deadlift)
pub const FULL_POWER_EVENT: &str = "SBD";

/// Date format used by the results export
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Weight Classes
// =============================================================================

/// Upper boundary standing in for "no upper bound" in every class scheme
pub const UNBOUNDED_UPPER_KG: f64 = 1000.0;

// =============================================================================
// Defaults
// =============================================================================

/// Lifters shown per weight class when nothing else is requested
pub const DEFAULT_TOP_N: usize = 10;

/// Largest per-class cutoff the dashboard offers
pub const MAX_TOP_N: usize = 100;

/// Athlete preselected in the history view
pub const DEFAULT_ATHLETE: &str = "Taylor Atwood";

/// Log level used when neither flags nor `RUST_LOG` say otherwise
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Levels accepted for the crate's log filter
pub const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Directory name under the platform data dir holding downloaded exports
pub const DATA_DIR_NAME: &str = "powerlifting-dashboard";

/// File patterns for the upstream export, flat or inside the extracted archive folder
pub const DATASET_FILE_PATTERNS: &[&str] =
    &["openpowerlifting-*.csv", "openpowerlifting-*/openpowerlifting-*.csv"];
