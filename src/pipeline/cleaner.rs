//! Per-request cleaning of the base table.
//!
//! The export's own weight-class column mixes the class rules of every
//! federation in it, so it is always overwritten with classes computed
//! from bodyweight for the selected federation.

use crate::constants::columns;
use crate::error::Result;
use crate::models::{Equipment, Federation, Sex};
use crate::schema::{f64_column, str_column};
use crate::weight_class::WeightClassScheme;

use polars::prelude::*;
use std::collections::BTreeSet;
use tracing::debug;

/// Derive an analysis-ready table from the base table.
///
/// Recomputes `WeightClass`, keeps rows whose equipment is in `equipment`
/// (an empty set keeps nothing) and sorts by Wilks descending. The sort is
/// stable, so equal scores keep their base-table order.
pub fn clean(
    base: &DataFrame,
    federation: Federation,
    equipment: &BTreeSet<Equipment>,
) -> Result<DataFrame> {
    let classes = assign_weight_classes(base, federation)?;

    let mut table = base.clone();
    table.with_column(classes.into_series())?;

    let allowed = equipment_mask(&table, equipment)?;
    let table = table.filter(&allowed)?;

    let table = table.sort(
        [columns::WILKS],
        SortMultipleOptions::default()
            .with_order_descending(true)
            .with_nulls_last(true)
            .with_maintain_order(true),
    )?;

    debug!(
        "Cleaned {} rows down to {} for {} / {:?}",
        base.height(),
        table.height(),
        federation,
        equipment
    );
    Ok(table)
}

/// Weight class of every row under the federation's scheme for its sex.
///
/// Rows without a bodyweight, or with an unsupported sex, get a null class.
pub fn assign_weight_classes(table: &DataFrame, federation: Federation) -> Result<StringChunked> {
    let men = WeightClassScheme::for_division(federation, Sex::Male);
    let women = WeightClassScheme::for_division(federation, Sex::Female);

    let sex = str_column(table, columns::SEX)?;
    let bodyweight = f64_column(table, columns::BODYWEIGHT)?;

    let classes: StringChunked = sex
        .into_iter()
        .zip(bodyweight)
        .map(|(sex, bodyweight)| {
            let scheme = match Sex::from_code(sex?)? {
                Sex::Male => men,
                Sex::Female => women,
            };
            scheme.classify(bodyweight?)
        })
        .collect();

    let unassigned = classes.null_count();
    if unassigned > 0 {
        debug!("{} rows left without a weight class", unassigned);
    }

    Ok(classes.with_name(columns::WEIGHT_CLASS.into()))
}

fn equipment_mask(table: &DataFrame, equipment: &BTreeSet<Equipment>) -> Result<BooleanChunked> {
    let values = str_column(table, columns::EQUIPMENT)?;
    Ok(equipment.iter().fold(
        BooleanChunked::full(PlSmallStr::EMPTY, false, table.height()),
        |mask, allowed| &mask | &values.equal(allowed.as_str()),
    ))
}
