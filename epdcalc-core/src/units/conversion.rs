//! Quantity conversion between input units and EPD declared units.
//!
//! The heart of the engine: translate a user-supplied quantity into the
//! unit an EPD factor is expressed per. Conversions are evaluated as an
//! ordered set of rules over the `(declared kind, input kind)` pair, first
//! match wins:
//!
//! 1. **Identity**: same non-parametric kind on both sides (mass, volume,
//!    area, count). Area-at-thickness identity is handled by rule 2.
//! 2. **Thickness ratio**: both sides area-at-thickness, the quantity is
//!    scaled by `input thickness / declared thickness`. Material volume is
//!    conserved; area is re-normalized to the declared reference thickness.
//! 3. **Density-mediated mass/volume**: multiply or divide by a density
//!    in kg/m³ when one is available. A density of exactly zero counts as
//!    absent, so the rule falls through instead of producing a silent zero
//!    or infinity.
//! 4. **Area to area-at-thickness**: a plain `m2` input converts to a
//!    declared `m2·<n>mm` only with a usable (non-zero) user thickness;
//!    otherwise the conversion fails with
//!    [`ConversionError::ThicknessRequired`].
//! 5. Anything else fails with [`ConversionError::Unsupported`].
//!
//! Every passing rule returns an empty warnings list. That emptiness is a
//! stable guarantee; the channel exists so future heuristics can advise
//! the caller without breaking the result shape.
//!
//! # Example
//!
//! ```
//! use epdcalc_core::units::to_declared_qty;
//!
//! // 10 m2 of 10 mm boards expressed per m2 of 30 mm product
//! let converted = to_declared_qty("m2·30mm", 10.0, "m2·10mm", None, None).unwrap();
//! assert!((converted.declared_qty - 10.0 / 3.0).abs() < 1e-12);
//! assert!(converted.warnings.is_empty());
//! ```

use super::parser::{ParseError, Unit, UnitKind};
use thiserror::Error;

/// Error type for conversion failures.
///
/// All variants are caller-input errors, never defects: they are
/// deterministic functions of the input, so retrying cannot change the
/// outcome.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// No rule bridges the input and declared kinds with the information
    /// provided (incompatible kinds, or a missing density).
    #[error("Unsupported conversion: {from} -> {to}")]
    Unsupported { from: String, to: String },

    /// An area-to-area-at-thickness conversion was requested without a
    /// usable thickness.
    #[error("Thickness required to convert {from} -> {to}")]
    ThicknessRequired { from: String, to: String },

    /// One of the unit strings failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// The outcome of a successful conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Converted {
    /// The input quantity expressed in the declared unit.
    pub declared_qty: f64,
    /// Advisory warnings. Currently always empty; see the module docs.
    pub warnings: Vec<String>,
}

impl Converted {
    fn new(declared_qty: f64) -> Self {
        Self {
            declared_qty,
            warnings: Vec::new(),
        }
    }
}

/// Converts a quantity from `input` into the `declared` unit.
///
/// `density_kg_m3` feeds rule 3 and `user_thickness_mm` feeds rule 4 of
/// the rule chain described in the module docs. Zero values for either
/// are treated as absent.
///
/// # Errors
///
/// [`ConversionError::ThicknessRequired`] when the declared unit is
/// area-at-thickness, the input is plain area, and no usable thickness
/// was supplied; [`ConversionError::Unsupported`] for every pair the rule
/// chain does not cover.
pub fn convert(
    declared: &Unit,
    input_qty: f64,
    input: &Unit,
    density_kg_m3: Option<f64>,
    user_thickness_mm: Option<f64>,
) -> Result<Converted, ConversionError> {
    use UnitKind::{Area, AreaThickness, Count, Mass, Volume};

    // Zero means "not supplied" for both optional modifiers
    let density = density_kg_m3.filter(|d| *d != 0.0);
    let thickness = user_thickness_mm.filter(|t| *t != 0.0);

    let declared_qty = match (declared.kind(), input.kind()) {
        (Mass, Mass) | (Volume, Volume) | (Area, Area) | (Count, Count) => input_qty,

        (
            AreaThickness {
                thickness_mm: declared_mm,
            },
            AreaThickness {
                thickness_mm: input_mm,
            },
        ) => input_qty * (input_mm / declared_mm),

        (Mass, Volume) => match density {
            Some(d) => input_qty * d,
            None => return Err(unsupported(input, declared)),
        },
        (Volume, Mass) => match density {
            Some(d) => input_qty / d,
            None => return Err(unsupported(input, declared)),
        },

        (
            AreaThickness {
                thickness_mm: declared_mm,
            },
            Area,
        ) => match thickness {
            Some(t) if declared_mm != 0.0 => input_qty * (t / declared_mm),
            _ => {
                return Err(ConversionError::ThicknessRequired {
                    from: input.original().to_string(),
                    to: declared.original().to_string(),
                })
            }
        },

        _ => return Err(unsupported(input, declared)),
    };

    Ok(Converted::new(declared_qty))
}

/// Parses both unit strings and converts, in one call.
///
/// Convenience wrapper around [`Unit::parse`] and [`convert`] for callers
/// holding raw strings. Parse failures surface as
/// [`ConversionError::Parse`].
pub fn to_declared_qty(
    declared_unit: &str,
    input_qty: f64,
    input_unit: &str,
    density_kg_m3: Option<f64>,
    user_thickness_mm: Option<f64>,
) -> Result<Converted, ConversionError> {
    let declared = Unit::parse(declared_unit)?;
    let input = Unit::parse(input_unit)?;
    convert(&declared, input_qty, &input, density_kg_m3, user_thickness_mm)
}

fn unsupported(input: &Unit, declared: &Unit) -> ConversionError {
    ConversionError::Unsupported {
        from: input.original().to_string(),
        to: declared.original().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    #[test]
    fn test_identity_for_non_parametric_kinds() {
        for unit in ["kg", "m3", "m2", "unit"] {
            let converted = to_declared_qty(unit, 7.5, unit, None, None).unwrap();
            assert!(
                is_close!(converted.declared_qty, 7.5),
                "identity failed for {unit}"
            );
            assert!(converted.warnings.is_empty());
        }
    }

    #[test]
    fn test_identity_ignores_modifiers() {
        // Density and thickness are irrelevant when the kinds already match
        let converted = to_declared_qty("kg", 3.0, "kg", Some(999.0), Some(40.0)).unwrap();
        assert!(is_close!(converted.declared_qty, 3.0));
    }

    #[test]
    fn test_thickness_ratio() {
        let converted = to_declared_qty("m2·30mm", 10.0, "m2·10mm", None, None).unwrap();
        assert!(is_close!(converted.declared_qty, 10.0 * (10.0 / 30.0)));
        assert!(converted.warnings.is_empty());
    }

    #[test]
    fn test_thickness_ratio_identity() {
        // Area-at-thickness identity goes through the ratio rule
        let converted = to_declared_qty("m2·30mm", 4.0, "m2·30mm", None, None).unwrap();
        assert!(is_close!(converted.declared_qty, 4.0));
    }

    #[test]
    fn test_density_volume_to_mass() {
        let converted = to_declared_qty("kg", 2.0, "m3", Some(486.0), None).unwrap();
        assert!(is_close!(converted.declared_qty, 972.0));
    }

    #[test]
    fn test_density_mass_to_volume() {
        let converted = to_declared_qty("m3", 972.0, "kg", Some(486.0), None).unwrap();
        assert!(is_close!(converted.declared_qty, 2.0));
    }

    #[test]
    fn test_density_round_trip() {
        let density = Some(2267.0);
        let forward = to_declared_qty("kg", 1.7, "m3", density, None).unwrap();
        let back = to_declared_qty("m3", forward.declared_qty, "kg", density, None).unwrap();
        assert!(is_close!(back.declared_qty, 1.7));
    }

    #[test]
    fn test_missing_density_is_unsupported() {
        let err = to_declared_qty("kg", 2.0, "m3", None, None).unwrap_err();
        assert_eq!(
            err,
            ConversionError::Unsupported {
                from: "m3".to_string(),
                to: "kg".to_string(),
            }
        );
    }

    #[test]
    fn test_zero_density_treated_as_absent() {
        // Must fail, not silently produce zero or infinity
        let err = to_declared_qty("kg", 2.0, "m3", Some(0.0), None).unwrap_err();
        assert!(matches!(err, ConversionError::Unsupported { .. }));

        let err = to_declared_qty("m3", 2.0, "kg", Some(0.0), None).unwrap_err();
        assert!(matches!(err, ConversionError::Unsupported { .. }));
    }

    #[test]
    fn test_area_to_area_thickness_with_user_thickness() {
        let converted = to_declared_qty("m2·30mm", 10.0, "m2", None, Some(30.0)).unwrap();
        assert!(is_close!(converted.declared_qty, 10.0));

        let converted = to_declared_qty("m2·30mm", 10.0, "m2", None, Some(15.0)).unwrap();
        assert!(is_close!(converted.declared_qty, 5.0));
    }

    #[test]
    fn test_area_to_area_thickness_requires_thickness() {
        let err = to_declared_qty("m2·30mm", 10.0, "m2", None, None).unwrap_err();
        assert_eq!(
            err,
            ConversionError::ThicknessRequired {
                from: "m2".to_string(),
                to: "m2·30mm".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "Thickness required to convert m2 -> m2·30mm"
        );
    }

    #[test]
    fn test_zero_user_thickness_treated_as_absent() {
        let err = to_declared_qty("m2·30mm", 10.0, "m2", None, Some(0.0)).unwrap_err();
        assert!(matches!(err, ConversionError::ThicknessRequired { .. }));
    }

    #[test]
    fn test_zero_declared_thickness_is_not_divided_by() {
        let err = to_declared_qty("m2·0mm", 10.0, "m2", None, Some(10.0)).unwrap_err();
        assert!(matches!(err, ConversionError::ThicknessRequired { .. }));
    }

    #[test]
    fn test_unsupported_pairs_fail() {
        // A representative sample of pairs outside the rule table
        let cases = [
            ("kg", "m2"),
            ("kg", "unit"),
            ("m3", "m2"),
            ("m2", "m3"),
            ("unit", "kg"),
            ("m2", "m2·30mm"),
            ("kg", "m2·30mm"),
            ("m2·30mm", "kg"),
        ];
        for (declared, input) in cases {
            let err = to_declared_qty(declared, 1.0, input, Some(1000.0), Some(10.0)).unwrap_err();
            assert!(
                matches!(err, ConversionError::Unsupported { .. }),
                "expected unsupported for {input} -> {declared}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_unsupported_error_names_both_units() {
        let err = to_declared_qty("unit", 1.0, "kg", None, None).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported conversion: kg -> unit");
    }

    #[test]
    fn test_parse_errors_surface() {
        let err = to_declared_qty("kg", 1.0, "bogus", None, None).unwrap_err();
        assert_eq!(
            err,
            ConversionError::Parse(ParseError::UnsupportedUnit("bogus".to_string()))
        );
    }

    #[test]
    fn test_no_passing_rule_emits_warnings() {
        let passing = [
            to_declared_qty("kg", 1.0, "kg", None, None),
            to_declared_qty("m2·30mm", 1.0, "m2·10mm", None, None),
            to_declared_qty("kg", 1.0, "m3", Some(500.0), None),
            to_declared_qty("m2·30mm", 1.0, "m2", None, Some(20.0)),
        ];
        for result in passing {
            assert!(result.unwrap().warnings.is_empty());
        }
    }
}
