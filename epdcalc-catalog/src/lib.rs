//! Built-in EPD dataset for the epdcalc engine.
//!
//! Seven Norwegian EPD records embedded at compile time and parsed once
//! on first access. The dataset is small on purpose: it covers every
//! declared-unit kind the engine supports (mass, volume, area, piece,
//! and area-at-thickness) and is enough to cost a simple building
//! envelope.
//!
//! ```
//! use epdcalc_catalog::builtin;
//!
//! let catalog = builtin();
//! let concrete = catalog.get("concrete_c16_20").unwrap();
//! assert_eq!(concrete.declared_unit.original(), "m3");
//! assert_eq!(concrete.gwp_per_declared_unit, 103.0);
//! ```

use epdcalc_core::EpdCatalog;
use std::sync::LazyLock;

/// The embedded catalog, parsed on first access.
static BUILTIN: LazyLock<EpdCatalog> = LazyLock::new(|| {
    EpdCatalog::from_toml_str(include_str!("../data/epd.toml"))
        .expect("embedded EPD catalog is well-formed")
});

/// Returns the built-in EPD catalog.
#[must_use]
pub fn builtin() -> &'static EpdCatalog {
    &BUILTIN
}
