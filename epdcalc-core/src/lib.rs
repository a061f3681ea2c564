//! Core engine for cradle-to-gate (A1–A3) greenhouse-gas accounting.
//!
//! The engine reconciles bill-of-materials quantities, expressed in
//! whatever unit the estimator used, with the declared units of
//! Environmental Product Declarations, and totals the resulting GWP
//! contributions. It is purely synchronous and side-effect-free: a
//! calculation reads an immutable [`catalog::EpdCatalog`] plus its input
//! lines and returns a value, so concurrent callers need no coordination.

pub mod calculation;
pub mod catalog;
pub mod units;

// Re-export the main types for convenient access
pub use calculation::{
    calculate, calculate_today, CalculationError, CalculationLine, CalculationResult, ResultLine,
};
pub use catalog::{CatalogEntry, CatalogError, EpdCatalog, EpdRecord, ValidityStatus};
pub use units::{convert, to_declared_qty, ConversionError, Converted, ParseError, Unit, UnitKind};
