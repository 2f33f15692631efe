//! Cleaner tests: weight-class assignment, equipment filter and ordering

use super::fixtures::{FixtureRow, load_rows};
use crate::constants::columns;
use crate::models::{Equipment, Federation, records};
use crate::pipeline::{assign_weight_classes, clean};
use std::collections::BTreeSet;

fn raw_only() -> BTreeSet<Equipment> {
    BTreeSet::from([Equipment::Raw])
}

fn names(table: &polars::prelude::DataFrame) -> Vec<String> {
    records(table)
        .unwrap()
        .into_iter()
        .map(|record| record.name)
        .collect()
}

#[test]
fn test_raw_filter_keeps_every_raw_row() {
    let dataset = load_rows(&[
        FixtureRow::new("Raw One", "M", 80.0),
        FixtureRow::new("Wraps One", "M", 80.0).equipment("Wraps"),
        FixtureRow::new("Raw Two", "F", 60.0),
        FixtureRow::new("Single One", "F", 60.0).equipment("Single-ply"),
    ]);

    let cleaned = clean(dataset.base(), Federation::Ipf, &raw_only()).unwrap();

    assert_eq!(cleaned.height(), 2);
    for record in records(&cleaned).unwrap() {
        assert_eq!(record.equipment.as_deref(), Some("Raw"));
    }
}

#[test]
fn test_multiple_equipment_categories() {
    let dataset = load_rows(&[
        FixtureRow::new("Raw One", "M", 80.0),
        FixtureRow::new("Wraps One", "M", 80.0).equipment("Wraps"),
        FixtureRow::new("Multi One", "M", 80.0).equipment("Multi-ply"),
    ]);

    let equipment = BTreeSet::from([Equipment::Raw, Equipment::Wraps]);
    let cleaned = clean(dataset.base(), Federation::Ipf, &equipment).unwrap();

    let mut kept = names(&cleaned);
    kept.sort();
    assert_eq!(kept, vec!["Raw One", "Wraps One"]);
}

#[test]
fn test_empty_equipment_set_keeps_nothing() {
    let dataset = load_rows(&[
        FixtureRow::new("Raw One", "M", 80.0),
        FixtureRow::new("Wraps One", "M", 80.0).equipment("Wraps"),
    ]);

    let cleaned = clean(dataset.base(), Federation::Wrpf, &BTreeSet::new()).unwrap();

    assert_eq!(cleaned.height(), 0);
    assert_eq!(cleaned.width(), dataset.base().width());
}

#[test]
fn test_never_adds_rows() {
    let dataset = load_rows(&[
        FixtureRow::new("A", "M", 80.0),
        FixtureRow::new("B", "F", 55.0),
        FixtureRow::new("C", "M", 130.0).equipment("Wraps"),
    ]);

    let all = Equipment::ALL.into_iter().collect::<BTreeSet<_>>();
    for federation in Federation::ALL {
        let cleaned = clean(dataset.base(), federation, &all).unwrap();
        assert!(cleaned.height() <= dataset.len());
        assert_eq!(cleaned.height(), 3);
    }
}

#[test]
fn test_weight_class_depends_on_federation() {
    let dataset = load_rows(&[
        FixtureRow::new("Middle Man", "M", 90.0).weight_class("90"),
        FixtureRow::new("Light Woman", "F", 59.5).weight_class("60"),
    ]);

    let ipf = records(&clean(dataset.base(), Federation::Ipf, &raw_only()).unwrap()).unwrap();
    let wrpf = records(&clean(dataset.base(), Federation::Wrpf, &raw_only()).unwrap()).unwrap();

    let class_of = |rows: &[crate::models::LiftRecord], name: &str| {
        rows.iter()
            .find(|record| record.name == name)
            .and_then(|record| record.weight_class.clone())
    };
    assert_eq!(class_of(&ipf, "Middle Man").as_deref(), Some("93"));
    assert_eq!(class_of(&wrpf, "Middle Man").as_deref(), Some("90"));
    assert_eq!(class_of(&ipf, "Light Woman").as_deref(), Some("63"));
    assert_eq!(class_of(&wrpf, "Light Woman").as_deref(), Some("60"));
}

#[test]
fn test_source_weight_class_is_overwritten() {
    let dataset = load_rows(&[FixtureRow::new("Heavy", "M", 121.3).weight_class("125")]);

    let cleaned = clean(dataset.base(), Federation::Ipf, &raw_only()).unwrap();

    assert_eq!(
        records(&cleaned).unwrap()[0].weight_class.as_deref(),
        Some("120+")
    );
}

#[test]
fn test_boundary_bodyweight_belongs_to_lower_class() {
    let dataset = load_rows(&[
        FixtureRow::new("On The Line", "M", 83.0),
        FixtureRow::new("Just Over", "M", 83.01),
    ]);

    let cleaned = clean(dataset.base(), Federation::Ipf, &raw_only()).unwrap();
    let rows = records(&cleaned).unwrap();

    let on_line = rows.iter().find(|r| r.name == "On The Line").unwrap();
    let over = rows.iter().find(|r| r.name == "Just Over").unwrap();
    assert_eq!(on_line.weight_class.as_deref(), Some("83"));
    assert_eq!(over.weight_class.as_deref(), Some("93"));
}

#[test]
fn test_missing_bodyweight_gives_null_class() {
    let dataset = load_rows(&[FixtureRow::new("Unweighed", "F", 0.0).bodyweight(None)]);

    let classes = assign_weight_classes(dataset.base(), Federation::Ipf).unwrap();

    assert_eq!(classes.name().as_str(), columns::WEIGHT_CLASS);
    assert_eq!(classes.len(), 1);
    assert_eq!(classes.get(0), None);
}

#[test]
fn test_sorted_by_wilks_descending_and_stable() {
    let dataset = load_rows(&[
        FixtureRow::new("Mid First", "M", 80.0).wilks(400.0),
        FixtureRow::new("Top", "F", 60.0).wilks(450.0),
        FixtureRow::new("Low", "M", 100.0).wilks(300.0),
        FixtureRow::new("Mid Second", "F", 70.0).wilks(400.0),
    ]);

    let cleaned = clean(dataset.base(), Federation::Ipf, &raw_only()).unwrap();

    assert_eq!(names(&cleaned), vec!["Top", "Mid First", "Mid Second", "Low"]);
}

#[test]
fn test_base_table_is_not_mutated() {
    let dataset = load_rows(&[
        FixtureRow::new("Low", "M", 90.0).wilks(300.0).weight_class("90"),
        FixtureRow::new("Wraps", "M", 90.0).equipment("Wraps"),
        FixtureRow::new("High", "M", 90.0).wilks(500.0).weight_class("90"),
    ]);
    let before = records(dataset.base()).unwrap();

    let _ = clean(dataset.base(), Federation::Ipf, &raw_only()).unwrap();
    let _ = clean(dataset.base(), Federation::Wrpf, &BTreeSet::new()).unwrap();

    assert_eq!(records(dataset.base()).unwrap(), before);
    assert_eq!(before[0].weight_class.as_deref(), Some("90"));
}

#[test]
fn test_dataset_clean_matches_free_function() {
    let dataset = load_rows(&[
        FixtureRow::new("A", "M", 80.0).wilks(350.0),
        FixtureRow::new("B", "M", 90.0).wilks(360.0),
    ]);

    let via_handle = dataset.clean(Federation::Wrpf, &raw_only()).unwrap();
    let via_function = clean(dataset.base(), Federation::Wrpf, &raw_only()).unwrap();

    assert_eq!(records(&via_handle).unwrap(), records(&via_function).unwrap());
}

#[test]
fn test_clones_share_one_base_table() {
    let dataset = load_rows(&[
        FixtureRow::new("A", "M", 80.0),
        FixtureRow::new("B", "F", 60.0).equipment("Wraps"),
    ]);
    let handle = dataset.clone();

    let shared = dataset.shared();
    assert!(std::sync::Arc::ptr_eq(&shared, &handle.shared()));

    let cleaned = handle.clean(Federation::Wrpf, &raw_only()).unwrap();
    assert_eq!(cleaned.height(), 1);
    assert_eq!(shared.height(), 2);
    assert_eq!(records(&shared).unwrap(), records(dataset.base()).unwrap());
}
