use std::collections::{BTreeMap, BTreeSet};

use super::model::{GalaxyDoc, Measurement};
use super::units::{store_quantity, Quantity, Unit};
use crate::analysis::validity;

/// Column → preferred reference key.
pub type Selection = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// Cell – one chosen measurement
// ---------------------------------------------------------------------------

/// The measurement picked for one galaxy and one field.
///
/// `value` is `None` for missing data of any kind (absent, non-finite, or a
/// sentinel/placeholder in a column that uses them); there is no other
/// missing-data marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub value: Option<f64>,
    pub unit: Option<Unit>,
    pub reference: String,
}

impl Cell {
    pub fn from_measurement(field: &str, m: &Measurement) -> Self {
        let value = validity::clean(field, m.scalar(), m.error_upper);
        let unit = value.and_then(|v| store_quantity(v, m.unit.as_deref()).unit);
        Self {
            value,
            unit,
            reference: m.reference.clone(),
        }
    }

    pub fn quantity(&self) -> Option<Quantity> {
        self.value.map(|value| Quantity {
            value,
            unit: self.unit,
        })
    }
}

/// Choose the measurement of a field to show.
///
/// Order: the one whose reference matches `preferred`, then the one flagged
/// best, then the first. A preferred reference that is not present falls
/// back to best.
pub fn pick<'a>(
    field: &str,
    measurements: &'a [Measurement],
    preferred: Option<&str>,
) -> Option<&'a Measurement> {
    if let Some(reference) = preferred {
        match measurements.iter().find(|m| m.reference == reference) {
            Some(m) => return Some(m),
            None => log::warn!("{field}: no measurement from {reference}, using best value"),
        }
    }
    measurements
        .iter()
        .find(|m| m.is_best())
        .or_else(|| measurements.first())
}

// ---------------------------------------------------------------------------
// CatalogRow / CatalogTable
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRow {
    pub name: String,
    pub cells: BTreeMap<String, Cell>,
}

impl CatalogRow {
    /// Flatten a document using the per-column reference selection.
    pub fn from_doc(doc: &GalaxyDoc, selection: &Selection) -> Self {
        let cells = doc
            .fields
            .iter()
            .filter_map(|(field, ms)| {
                let preferred = selection.get(field).map(String::as_str);
                pick(field, ms, preferred).map(|m| (field.clone(), Cell::from_measurement(field, m)))
            })
            .collect();
        Self {
            name: doc.name.clone(),
            cells,
        }
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.cells.get(column)
    }

    pub fn value(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(|c| c.value)
    }

    /// Value converted into `unit`; unitless cells are taken as given.
    pub fn value_in(&self, column: &str, unit: Unit) -> Option<f64> {
        self.get(column)
            .and_then(Cell::quantity)
            .and_then(|q| q.value_in(unit))
    }
}

/// Query result: one row per galaxy, columns sorted by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogTable {
    pub rows: Vec<CatalogRow>,
    /// Union of field names across rows (excludes `name`).
    pub columns: Vec<String>,
}

impl CatalogTable {
    pub fn from_rows(rows: Vec<CatalogRow>) -> Self {
        let columns: BTreeSet<String> = rows
            .iter()
            .flat_map(|r| r.cells.keys().cloned())
            .collect();
        Self {
            rows,
            columns: columns.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, name: &str) -> Option<&CatalogRow> {
        self.rows.iter().find(|r| r.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.name.as_str())
    }

    /// Values of one column in row order.
    pub fn column(&self, column: &str) -> Vec<Option<f64>> {
        self.rows.iter().map(|r| r.value(column)).collect()
    }

    /// The unit of a column, taken from the first row that has one.
    pub fn unit_of(&self, column: &str) -> Option<Unit> {
        self.rows
            .iter()
            .find_map(|r| r.get(column).and_then(|c| c.unit))
    }
}
