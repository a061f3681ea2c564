//! The EPD catalog: an immutable, in-memory collection of material records.
//!
//! The catalog is constructed once at startup and read many times; it is
//! `Sync` and carries no interior mutability, so concurrent calculations
//! can share a reference freely. Records keep their authored order, which
//! is the order [`EpdCatalog::records`] and [`EpdCatalog::entries`]
//! iterate in.
//!
//! Catalogs are built either programmatically with
//! [`EpdCatalog::from_records`] or from a TOML document with
//! [`EpdCatalog::from_toml_str`]:
//!
//! ```toml
//! [[epd]]
//! id = "concrete_c16_20"
//! name = "Ready-mixed concrete C16/20"
//! declared_unit = "m3"
//! gwp_per_declared_unit = 103.0
//! density_kg_m3 = 2267.0
//! valid_until = "2030-10-28"
//! ```
//!
//! Declared units are parsed while deserializing (see
//! [`Unit`](crate::units::Unit)), so a catalog that loads successfully
//! only ever serves records whose declared unit satisfies the grammar.

use crate::units::Unit;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Error type for catalog construction failures.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Two records share the same identifier.
    #[error("duplicate EPD id: {0}")]
    DuplicateId(String),

    /// The TOML document is malformed, or a record in it is invalid
    /// (including declared units outside the grammar).
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

/// Validity of an EPD record at a given evaluation date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidityStatus {
    /// The record's `valid_until` date is on or after the evaluation date.
    Valid,
    /// The record's `valid_until` date has passed.
    Expired,
    /// The record has no `valid_until` date, or the stored date does not
    /// parse as an ISO calendar date.
    Unknown,
}

impl fmt::Display for ValidityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Valid => "valid",
            Self::Expired => "expired",
            Self::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

/// A single Environmental Product Declaration record.
///
/// Immutable and externally supplied: the engine never authors or edits
/// records, it only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpdRecord {
    /// Unique identifier within the catalog.
    pub id: String,
    /// Display name of the material.
    pub name: String,
    /// The unit the GWP factor is expressed per.
    pub declared_unit: Unit,
    /// GWP (A1–A3) per declared unit, in kg CO2-equivalent. Non-negative.
    pub gwp_per_declared_unit: f64,
    /// Bulk density in kg/m³, positive when present. Enables mass/volume
    /// conversions for this material.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density_kg_m3: Option<f64>,
    /// End of the declaration's validity period as an ISO date string.
    ///
    /// Kept raw rather than parsed at load time: a malformed date must
    /// degrade to [`ValidityStatus::Unknown`] at evaluation, never reject
    /// the record or the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,
}

impl EpdRecord {
    /// Computes the validity status of this record at `today`.
    ///
    /// `Valid` if the stored end date is on or after `today`, `Expired`
    /// if it is earlier, `Unknown` when the date is absent or fails to
    /// parse.
    pub fn validity_on(&self, today: NaiveDate) -> ValidityStatus {
        let Some(raw) = self.valid_until.as_deref() else {
            return ValidityStatus::Unknown;
        };
        match raw.parse::<NaiveDate>() {
            Ok(end) if end >= today => ValidityStatus::Valid,
            Ok(_) => ValidityStatus::Expired,
            Err(_) => {
                log::warn!(
                    "EPD {}: valid_until '{}' is not an ISO date, validity unknown",
                    self.id,
                    raw
                );
                ValidityStatus::Unknown
            }
        }
    }
}

/// A read-only projection of one record for catalog listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub declared_unit: Unit,
    pub gwp_per_declared_unit: f64,
    pub valid: ValidityStatus,
}

/// An immutable catalog of EPD records, indexed by identifier.
#[derive(Debug, Clone)]
pub struct EpdCatalog {
    /// Records in authored order.
    records: Vec<EpdRecord>,
    /// Identifier -> position in `records`.
    index: HashMap<String, usize>,
}

impl EpdCatalog {
    /// Builds a catalog from records, keeping their order.
    ///
    /// # Errors
    ///
    /// [`CatalogError::DuplicateId`] if two records share an identifier.
    pub fn from_records(records: Vec<EpdRecord>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if index.insert(record.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(record.id.clone()));
            }
        }
        log::debug!("EPD catalog constructed with {} records", records.len());
        Ok(Self { records, index })
    }

    /// Parses a catalog from a TOML document of `[[epd]]` tables.
    pub fn from_toml_str(document: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = toml::from_str(document)?;
        Self::from_records(document.epds)
    }

    /// Looks up a record by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&EpdRecord> {
        self.index.get(id).map(|&position| &self.records[position])
    }

    /// Iterates over all records in authored order.
    pub fn records(&self) -> impl Iterator<Item = &EpdRecord> {
        self.records.iter()
    }

    /// Returns the number of records in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the catalog holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the listing projection of every record, in authored order,
    /// with validity evaluated at `today`.
    #[must_use]
    pub fn entries(&self, today: NaiveDate) -> Vec<CatalogEntry> {
        self.records
            .iter()
            .map(|record| CatalogEntry {
                id: record.id.clone(),
                name: record.name.clone(),
                declared_unit: record.declared_unit.clone(),
                gwp_per_declared_unit: record.gwp_per_declared_unit,
                valid: record.validity_on(today),
            })
            .collect()
    }
}

/// On-disk catalog shape: a sequence of `[[epd]]` tables.
#[derive(Deserialize)]
struct CatalogDocument {
    #[serde(default, rename = "epd")]
    epds: Vec<EpdRecord>,
}
