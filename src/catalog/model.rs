use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use super::units::values_from_distribution;

/// Field holding the galaxy identifier in every document.
pub const ID_COLUMN: &str = "name";

// ---------------------------------------------------------------------------
// Measurement – one literature value of one field
// ---------------------------------------------------------------------------

/// A single published value for a field, tagged with its source.
///
/// Keys the catalog does not know about are kept in `extra` so a document
/// survives a load/save cycle unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Posterior samples, used when no point value is published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_upper: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_lower: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<f64>,
    /// `1` marks the preferred measurement of a field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best: Option<i64>,
    /// Key into the references file. Empty when unattributed.
    #[serde(default)]
    pub reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Measurement {
    /// Measurement with a point value and a reference, flagged as best.
    pub fn new(value: f64, reference: &str) -> Self {
        Self {
            value: Some(value),
            best: Some(1),
            reference: reference.to_string(),
            ..Default::default()
        }
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    pub fn with_errors(mut self, upper: f64, lower: f64) -> Self {
        self.error_upper = Some(upper);
        self.error_lower = Some(lower);
        self
    }

    pub fn is_best(&self) -> bool {
        self.best == Some(1)
    }

    /// Look up any sub-key as JSON, the way the query language sees it.
    pub fn get(&self, key: &str) -> Option<JsonValue> {
        match key {
            "value" => self.value.map(JsonValue::from),
            "distribution" => self.distribution.as_ref().map(|d| JsonValue::from(d.clone())),
            "error_upper" => self.error_upper.map(JsonValue::from),
            "error_lower" => self.error_lower.map(JsonValue::from),
            "error" => self.error.map(JsonValue::from),
            "best" => self.best.map(JsonValue::from),
            "reference" => Some(JsonValue::from(self.reference.clone())),
            "unit" => self.unit.clone().map(JsonValue::from),
            other => self.extra.get(other).cloned(),
        }
    }

    /// Point value, falling back to the mean of the distribution.
    pub fn scalar(&self) -> Option<f64> {
        self.value.or_else(|| {
            self.distribution
                .as_deref()
                .and_then(|d| values_from_distribution(d, None))
                .map(|s| s.value)
        })
    }
}

// ---------------------------------------------------------------------------
// GalaxyDoc – one JSON file in the data directory
// ---------------------------------------------------------------------------

/// One galaxy: its name plus every measured field.
///
/// On disk this is a flat object: `{"name": "...", "ra": [{...}], ...}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalaxyDoc {
    /// Empty when the source JSON had no name; the validator rejects that.
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Vec<Measurement>>,
}

impl GalaxyDoc {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style helper, mostly for tests and the importer.
    pub fn with_field(mut self, field: &str, measurements: Vec<Measurement>) -> Self {
        self.fields.insert(field.to_string(), measurements);
        self
    }

    pub fn field(&self, field: &str) -> Option<&[Measurement]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// File name used when saving: trimmed name, spaces → `_`, `.json`.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.name.trim().replace(' ', "_"))
    }

    pub fn measurement_count(&self) -> usize {
        self.fields.values().map(Vec::len).sum()
    }
}

// ---------------------------------------------------------------------------
// Reference – bibliographic record
// ---------------------------------------------------------------------------

/// An entry of the references file. Only `key` is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    /// `Author_Year_N`, the string measurements point at.
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default)]
    pub doi: String,
    #[serde(default)]
    pub bibcode: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub journal: String,
    #[serde(default)]
    pub title: String,
}
