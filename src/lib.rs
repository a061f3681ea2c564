//! Cradle-to-gate (A1–A3) greenhouse-gas accounting for bills of
//! construction materials.
//!
//! This facade re-exports the engine ([`epdcalc_core`]) together with the
//! built-in EPD dataset ([`epdcalc_catalog`]). A transport shell (HTTP or
//! otherwise) needs exactly two operations: [`EpdCatalog::entries`] for
//! the catalog listing and [`calculate`] for a bill of materials.
//!
//! # Example
//!
//! ```
//! use epdcalc::{builtin, calculate, CalculationLine};
//!
//! let lines = vec![
//!     CalculationLine {
//!         epd_id: "concrete_c16_20".to_string(),
//!         input_qty: 2.0,
//!         input_unit: "m3".to_string(),
//!         density_kg_m3: None,
//!         thickness_mm: None,
//!     },
//!     CalculationLine {
//!         epd_id: "eps_bewi_30mm".to_string(),
//!         input_qty: 10.0,
//!         input_unit: "m2·10mm".to_string(),
//!         density_kg_m3: None,
//!         thickness_mm: None,
//!     },
//! ];
//!
//! let result = calculate(builtin(), &lines, "2026-08-30".parse().unwrap()).unwrap();
//! assert_eq!(result.lines[0].gwp_total, 206.0);
//! assert_eq!(result.lines[1].gwp_total, 2.767);
//! assert_eq!(result.sum_gwp, 208.767);
//! ```

pub use epdcalc_catalog::builtin;
pub use epdcalc_core::*;
