//! Declared-unit parser.
//!
//! EPD declared units are human-authored shorthand mixing a physical unit
//! with an optional baked-in thickness, e.g. `m2·30mm` for "one square
//! metre of product at 30 mm". This module normalizes those strings into
//! a [`UnitKind`] plus numeric modifier so the conversion logic downstream
//! works on semantics rather than strings.
//!
//! # Grammar
//!
//! ```text
//! unit       = simple | composite
//! simple     = 'kg' | 'm3' | 'm2' | 'unit'
//! composite  = 'm2' sep integer 'mm'        (case-insensitive)
//! sep        = '·' | 'x' | '*'
//! ```
//!
//! Surrounding whitespace is trimmed. The four simple tokens are matched
//! exactly; only the composite form is case-insensitive. Anything else is
//! rejected with [`ParseError::UnsupportedUnit`].

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error type for unit parsing failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The unit string does not match the grammar. Carries the offending
    /// (trimmed) input.
    #[error("Unsupported unit: {0}")]
    UnsupportedUnit(String),
}

/// The semantic kind of a unit.
///
/// A closed enumeration: the EPD data this engine consumes only ever
/// declares quantities per mass, volume, area, piece, or area at a
/// reference thickness. Only [`UnitKind::AreaThickness`] carries data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum UnitKind {
    /// Kilograms.
    Mass,
    /// Cubic metres.
    Volume,
    /// Square metres.
    Area,
    /// Pieces (`unit` in EPD shorthand).
    Count,
    /// Square metres at a declared reference thickness in millimetres.
    AreaThickness { thickness_mm: f64 },
}

impl UnitKind {
    /// Returns the thickness modifier, if this kind carries one.
    #[must_use]
    pub fn thickness_mm(&self) -> Option<f64> {
        match self {
            Self::AreaThickness { thickness_mm } => Some(*thickness_mm),
            _ => None,
        }
    }
}

/// A parsed unit.
///
/// Retains the original input string (trimmed) for display and error
/// messages alongside the parsed [`UnitKind`].
///
/// # Equality
///
/// Two units are equal if they parse to the same kind, so
/// `Unit::parse("m2x30mm") == Unit::parse("M2·30MM")` even though the
/// original strings differ.
///
/// # Serde
///
/// Serializes as the original string and deserializes through
/// [`Unit::parse`], so any record carrying a declared unit enforces the
/// grammar at load time.
///
/// # Examples
///
/// ```
/// use epdcalc_core::units::{Unit, UnitKind};
///
/// let unit = Unit::parse("m2·30mm").unwrap();
/// assert_eq!(
///     unit.kind(),
///     UnitKind::AreaThickness { thickness_mm: 30.0 }
/// );
/// assert_eq!(unit.original(), "m2·30mm");
///
/// assert!(Unit::parse("ft3").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Unit {
    /// The original input string, trimmed.
    original: String,
    /// The parsed kind.
    kind: UnitKind,
}

impl Unit {
    /// Parses a unit string.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnsupportedUnit`] for any input outside the
    /// grammar described in the module documentation.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = input.trim();

        let kind = match trimmed {
            "kg" => Some(UnitKind::Mass),
            "m3" => Some(UnitKind::Volume),
            "m2" => Some(UnitKind::Area),
            "unit" => Some(UnitKind::Count),
            other => parse_area_thickness(other),
        };

        match kind {
            Some(kind) => Ok(Self {
                original: trimmed.to_string(),
                kind,
            }),
            None => Err(ParseError::UnsupportedUnit(trimmed.to_string())),
        }
    }

    /// Returns the original (trimmed) input string.
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Returns the parsed kind.
    #[must_use]
    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    /// Returns the thickness modifier in millimetres, if any.
    #[must_use]
    pub fn thickness_mm(&self) -> Option<f64> {
        self.kind.thickness_mm()
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        // Compare by parsed kind, not by spelling
        self.kind == other.kind
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

impl TryFrom<String> for Unit {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.original
    }
}

/// Matches the composite form `m2<sep><integer>mm`, case-insensitive.
fn parse_area_thickness(input: &str) -> Option<UnitKind> {
    let lower = input.to_lowercase();
    let rest = lower.strip_prefix("m2")?;

    let mut chars = rest.chars();
    let sep = chars.next()?;
    if !matches!(sep, '\u{00B7}' | 'x' | '*') {
        return None;
    }

    let digits = chars.as_str().strip_suffix("mm")?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let thickness_mm = digits.parse().ok()?;
    Some(UnitKind::AreaThickness { thickness_mm })
}
