//! Integration tests for the calculation module.
//!
//! These tests drive the orchestrator end to end against fabricated
//! catalogs: lookup, density resolution, conversion policy, rounding
//! discipline, and validity evaluation.


use crate::catalog::{EpdCatalog, EpdRecord};
use crate::units::Unit;
use chrono::NaiveDate;

/// Evaluation date used throughout unless a test needs its own.
fn today() -> NaiveDate {
    "2026-08-30".parse().unwrap()
}

fn record(
    id: &str,
    name: &str,
    declared_unit: &str,
    gwp: f64,
    density: Option<f64>,
    valid_until: Option<&str>,
) -> EpdRecord {
    EpdRecord {
        id: id.to_string(),
        name: name.to_string(),
        declared_unit: Unit::parse(declared_unit).unwrap(),
        gwp_per_declared_unit: gwp,
        density_kg_m3: density,
        valid_until: valid_until.map(str::to_string),
    }
}

/// A small catalog covering every declared-unit kind.
fn catalog() -> EpdCatalog {
    EpdCatalog::from_records(vec![
        record(
            "concrete",
            "Ready-mixed concrete C16/20",
            "m3",
            103.0,
            Some(2267.0),
            Some("2030-10-28"),
        ),
        record(
            "eps",
            "EPS impact sound insulation 30 mm",
            "m2·30mm",
            0.83,
            None,
            Some("2030-08-18"),
        ),
        record(
            "timber",
            "Sawn timber, spruce or pine",
            "m3",
            36.3,
            Some(486.0),
            Some("2030-10-29"),
        ),
        record("flooring", "Click vinyl flooring", "m2", 7.8, None, None),
        record(
            "render",
            "Cement-based render",
            "kg",
            0.16,
            None,
            Some("2030-12-01"),
        ),
        record(
            "window",
            "Side-hung window",
            "unit",
            87.4,
            None,
            Some("2020-03-07"),
        ),
    ])
    .unwrap()
}
