//! Weight-class catalog.
//!
//! Each federation publishes its own bodyweight classes, and they differ
//! between men and women. A scheme partitions `[0, inf)` into half-open
//! intervals `(lower, upper]`; the last interval ends at a sentinel and is
//! treated as unbounded.

use crate::constants::UNBOUNDED_UPPER_KG;
use crate::error::{LiftError, Result};
use crate::models::{Federation, Sex};
use std::cmp::Ordering;

/// Ordered class boundaries and their display labels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightClassScheme {
    boundaries: &'static [f64],
    labels: &'static [&'static str],
}

const IPF_MEN: WeightClassScheme = WeightClassScheme {
    boundaries: &[0.0, 59.0, 66.0, 74.0, 83.0, 93.0, 105.0, 120.0, UNBOUNDED_UPPER_KG],
    labels: &["59", "66", "74", "83", "93", "105", "120", "120+"],
};

const IPF_WOMEN: WeightClassScheme = WeightClassScheme {
    boundaries: &[0.0, 47.0, 52.0, 57.0, 63.0, 72.0, 84.0, UNBOUNDED_UPPER_KG],
    labels: &["47", "52", "57", "63", "72", "84", "84+"],
};

const WRPF_MEN: WeightClassScheme = WeightClassScheme {
    boundaries: &[
        0.0,
        56.0,
        60.0,
        67.5,
        75.0,
        82.5,
        90.0,
        100.0,
        110.0,
        125.0,
        140.0,
        UNBOUNDED_UPPER_KG,
    ],
    labels: &[
        "56", "60", "67.5", "75", "82.5", "90", "100", "110", "125", "140", "140+",
    ],
};

const WRPF_WOMEN: WeightClassScheme = WeightClassScheme {
    boundaries: &[
        0.0,
        44.0,
        48.0,
        52.0,
        56.0,
        60.0,
        67.5,
        75.0,
        82.5,
        90.0,
        UNBOUNDED_UPPER_KG,
    ],
    labels: &["44", "48", "52", "56", "60", "67.5", "75", "82.5", "90", "90+"],
};

impl WeightClassScheme {
    /// Scheme for a federation and sex; total over the typed domain
    pub fn for_division(federation: Federation, sex: Sex) -> &'static WeightClassScheme {
        match (federation, sex) {
            (Federation::Ipf, Sex::Male) => &IPF_MEN,
            (Federation::Ipf, Sex::Female) => &IPF_WOMEN,
            (Federation::Wrpf, Sex::Male) => &WRPF_MEN,
            (Federation::Wrpf, Sex::Female) => &WRPF_WOMEN,
        }
    }

    /// Scheme for untyped identifiers such as `("IPF", "M")`
    pub fn lookup(federation: &str, sex: &str) -> Result<&'static WeightClassScheme> {
        let unknown = || LiftError::UnknownClassScheme {
            federation: federation.to_string(),
            sex: sex.to_string(),
        };
        let federation_id = federation.parse::<Federation>().map_err(|_| unknown())?;
        let sex_id = Sex::from_code(sex).ok_or_else(unknown)?;
        Ok(Self::for_division(federation_id, sex_id))
    }

    /// Strictly increasing boundaries from 0.0 to the sentinel
    pub fn boundaries(&self) -> &'static [f64] {
        self.boundaries
    }

    /// One label per interval, lightest first
    pub fn labels(&self) -> &'static [&'static str] {
        self.labels
    }

    /// Index of the interval `(lower, upper]` containing `bodyweight`.
    ///
    /// `0.0` belongs to the first class and anything above the sentinel to
    /// the last. Negative and NaN bodyweights have no class.
    pub fn class_index(&self, bodyweight: f64) -> Option<usize> {
        if bodyweight.is_nan() || bodyweight < self.boundaries[0] {
            return None;
        }
        let uppers = &self.boundaries[1..];
        let index = uppers.partition_point(|&upper| upper < bodyweight);
        Some(index.min(self.labels.len() - 1))
    }

    /// Label of the class containing `bodyweight`
    pub fn classify(&self, bodyweight: f64) -> Option<&'static str> {
        self.class_index(bodyweight).map(|index| self.labels[index])
    }
}

/// Boundaries and labels for a federation and sex given as identifiers.
///
/// Fails with `UnknownClassScheme` outside IPF/WRPF and M/F.
pub fn get_weight_classes(
    federation: &str,
    sex: &str,
) -> Result<(&'static [f64], &'static [&'static str])> {
    let scheme = WeightClassScheme::lookup(federation, sex)?;
    Ok((scheme.boundaries(), scheme.labels()))
}

/// Orders class labels by bodyweight: numeric value first, open-ended
/// (`+`) classes after the bounded class with the same number.
pub(crate) fn compare_labels(a: &str, b: &str) -> Ordering {
    fn key(label: &str) -> (Option<f64>, bool) {
        let trimmed = label.trim();
        let open = trimmed.ends_with('+');
        (trimmed.trim_end_matches('+').parse::<f64>().ok(), open)
    }

    match (key(a), key(b)) {
        ((Some(x), open_a), (Some(y), open_b)) => x.total_cmp(&y).then(open_a.cmp(&open_b)),
        ((Some(_), _), (None, _)) => Ordering::Less,
        ((None, _), (Some(_), _)) => Ordering::Greater,
        _ => a.cmp(b),
    }
}
