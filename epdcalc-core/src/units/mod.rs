//! Unit parsing and quantity conversion for EPD declared units.
//!
//! Environmental Product Declarations express their impact factors per
//! "declared unit": a short human-authored token such as `kg`, `m3`, `m2`,
//! `unit`, or the composite `m2·30mm` (area at a reference thickness).
//! Bills of materials arrive in whatever unit the estimator happened to
//! use, so this module reconciles the two:
//!
//! - [`parser`]: decomposes a unit string into a [`UnitKind`] plus
//!   optional thickness modifier
//! - [`conversion`]: converts a quantity between parsed units, mediated
//!   by density and thickness where the physics allows
//!
//! # Quick start
//!
//! ```
//! use epdcalc_core::units::{to_declared_qty, Unit};
//!
//! // Declared units match: identity
//! let converted = to_declared_qty("m3", 2.0, "m3", None, None).unwrap();
//! assert_eq!(converted.declared_qty, 2.0);
//!
//! // Mass declared, volume supplied: density bridges the gap
//! let converted = to_declared_qty("kg", 2.0, "m3", Some(486.0), None).unwrap();
//! assert_eq!(converted.declared_qty, 972.0);
//!
//! // Unknown units are rejected, carrying the offending string
//! assert!(Unit::parse("furlong").is_err());
//! ```
//!
//! # Supported conversions
//!
//! | Input | Declared | Mediator |
//! |-------|----------|----------|
//! | kg / m3 / m2 / unit | same kind | none |
//! | `m2·A mm` | `m2·B mm` | thickness ratio A/B |
//! | m3 | kg | density (multiply) |
//! | kg | m3 | density (divide) |
//! | m2 | `m2·B mm` | user thickness / B |
//!
//! Every other pair fails with [`ConversionError::Unsupported`].

pub mod conversion;
pub mod parser;

// Re-export the main types for convenient access
pub use conversion::{convert, to_declared_qty, ConversionError, Converted};
pub use parser::{ParseError, Unit, UnitKind};
