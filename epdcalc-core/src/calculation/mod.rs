//! The calculation orchestrator: from a bill of materials to A1–A3 totals.
//!
//! [`calculate`] walks the calculation lines in order. For each line it
//! looks up the EPD record, resolves which density applies (a per-line
//! override wins over the record's own), converts the input quantity into
//! the declared unit, and multiplies by the record's GWP factor. Any
//! failure (an unknown identifier, an unparseable input unit, an
//! unsupported conversion) aborts the whole batch; partial results are
//! never returned.
//!
//! The catalog is passed in explicitly rather than read from ambient
//! state, so tests can fabricate whatever catalog they need.
//!
//! # Rounding discipline
//!
//! Pinned, because it affects the aggregate's last decimal: each line
//! total is rounded to 3 decimal places, the rounded totals are summed,
//! and the sum is rounded to 3 decimal places again. Declared quantities
//! are reported at 4 decimal places (the raw value feeds the GWP
//! multiplication). All rounding is half-away-from-zero, see [`round_to`].
//!
//! # Example
//!
//! ```
//! use epdcalc_core::calculation::{calculate, CalculationLine};
//! use epdcalc_core::catalog::{EpdCatalog, EpdRecord};
//! use epdcalc_core::units::Unit;
//!
//! let catalog = EpdCatalog::from_records(vec![EpdRecord {
//!     id: "concrete".to_string(),
//!     name: "Ready-mixed concrete".to_string(),
//!     declared_unit: Unit::parse("m3").unwrap(),
//!     gwp_per_declared_unit: 103.0,
//!     density_kg_m3: Some(2267.0),
//!     valid_until: Some("2030-10-28".to_string()),
//! }])
//! .unwrap();
//!
//! let lines = vec![CalculationLine {
//!     epd_id: "concrete".to_string(),
//!     input_qty: 2.0,
//!     input_unit: "m3".to_string(),
//!     density_kg_m3: None,
//!     thickness_mm: None,
//! }];
//!
//! let result = calculate(&catalog, &lines, "2026-08-30".parse().unwrap()).unwrap();
//! assert_eq!(result.lines[0].gwp_total, 206.0);
//! assert_eq!(result.sum_gwp, 206.0);
//! ```

use crate::catalog::{EpdCatalog, ValidityStatus};
use crate::units::{convert, ConversionError, Unit};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Error type for calculation failures.
///
/// Both variants are caller-input errors with request-rejection
/// semantics: an unknown identifier maps to a 404-equivalent, a
/// conversion failure to a 400-equivalent. Neither is retryable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculationError {
    /// A referenced EPD identifier is absent from the catalog.
    #[error("EPD not found: {0}")]
    EpdNotFound(String),

    /// The input unit failed to parse, or no conversion rule bridges the
    /// input and declared units.
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// One line of a bill of materials. Ephemeral, constructed per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationLine {
    /// Identifier of the EPD record to apply.
    pub epd_id: String,
    /// Quantity in `input_unit`. Meaningful when non-negative.
    pub input_qty: f64,
    /// The unit the quantity is expressed in.
    pub input_unit: String,
    /// Per-line density override in kg/m³. Takes precedence over the
    /// record's own density; zero counts as absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density_kg_m3: Option<f64>,
    /// User-supplied thickness in mm for area-to-area-at-thickness
    /// conversions; zero counts as absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness_mm: Option<f64>,
}

/// The computed result for one calculation line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultLine {
    pub epd_id: String,
    pub material_name: String,
    pub input_qty: f64,
    pub input_unit: String,
    /// Input quantity expressed in the declared unit, rounded to 4 dp.
    pub declared_qty: f64,
    pub declared_unit: Unit,
    /// The record's GWP factor, kg CO2e per declared unit.
    pub gwp_per_declared_unit: f64,
    /// Line total in kg CO2e, rounded to 3 dp.
    pub gwp_total: f64,
    pub valid: ValidityStatus,
    pub warnings: Vec<String>,
}

/// The aggregate result of a calculation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    /// One result per input line, in input order.
    pub lines: Vec<ResultLine>,
    /// Sum of the rounded line totals, itself rounded to 3 dp.
    pub sum_gwp: f64,
    /// Union of the per-line warnings in encounter order.
    pub warnings: Vec<String>,
}

/// Computes A1–A3 totals for a bill of materials.
///
/// `today` is the evaluation date for EPD validity. The computation is
/// pure and synchronous: it reads the catalog and the lines, and returns
/// a value.
///
/// # Errors
///
/// [`CalculationError::EpdNotFound`] at the first line whose identifier
/// is not in the catalog, [`CalculationError::Conversion`] at the first
/// line whose unit cannot be parsed or converted. The whole batch aborts
/// either way.
pub fn calculate(
    catalog: &EpdCatalog,
    lines: &[CalculationLine],
    today: NaiveDate,
) -> Result<CalculationResult, CalculationError> {
    let mut result_lines = Vec::with_capacity(lines.len());
    let mut warnings = Vec::new();

    for line in lines {
        let record = catalog
            .get(&line.epd_id)
            .ok_or_else(|| CalculationError::EpdNotFound(line.epd_id.clone()))?;

        // A zero override counts as absent and falls back to the record
        let density = line
            .density_kg_m3
            .filter(|d| *d != 0.0)
            .or(record.density_kg_m3);

        let input_unit = Unit::parse(&line.input_unit).map_err(ConversionError::from)?;
        let converted = convert(
            &record.declared_unit,
            line.input_qty,
            &input_unit,
            density,
            line.thickness_mm,
        )?;

        // The line total multiplies the unrounded declared quantity;
        // only the reported declared_qty is rounded to 4 dp
        let gwp_total = round_to(record.gwp_per_declared_unit * converted.declared_qty, 3);

        result_lines.push(ResultLine {
            epd_id: line.epd_id.clone(),
            material_name: record.name.clone(),
            input_qty: line.input_qty,
            input_unit: line.input_unit.clone(),
            declared_qty: round_to(converted.declared_qty, 4),
            declared_unit: record.declared_unit.clone(),
            gwp_per_declared_unit: record.gwp_per_declared_unit,
            gwp_total,
            valid: record.validity_on(today),
            warnings: converted.warnings.clone(),
        });
        warnings.extend(converted.warnings);
    }

    let sum_gwp = round_to(result_lines.iter().map(|l| l.gwp_total).sum(), 3);

    Ok(CalculationResult {
        lines: result_lines,
        sum_gwp,
        warnings,
    })
}

/// [`calculate`] with validity evaluated at the local calendar date.
pub fn calculate_today(
    catalog: &EpdCatalog,
    lines: &[CalculationLine],
) -> Result<CalculationResult, CalculationError> {
    calculate(catalog, lines, chrono::Local::now().date_naive())
}

/// Rounds to `dp` decimal places, half away from zero.
///
/// This is the rounding used for every reported quantity in a
/// [`CalculationResult`]. Half-away-from-zero is the behavior of
/// [`f64::round`]; it is deterministic and applied consistently.
#[must_use]
pub fn round_to(value: f64, dp: i32) -> f64 {
    let factor = 10f64.powi(dp);
    (value * factor).round() / factor
}
