use std::path::Path;

use anyhow::{Context, Result};

use super::database::Database;
use super::error::ValidationError;
use super::loader::load_doc_file;
use super::model::GalaxyDoc;

/// Outcome of a successful validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub name: String,
    /// The name matched no document already in the database.
    pub is_new: bool,
    pub measurements: usize,
}

/// Checks a submitted document before it is merged into the database.
pub struct Validator<'a> {
    db: &'a Database,
}

impl<'a> Validator<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Run every check on `doc`.
    pub fn validate(&self, doc: &GalaxyDoc) -> Result<ValidationReport, ValidationError> {
        let name = check_name(doc)?;
        let is_new = !self.check_exists(name);
        let measurements = self.check_values(doc)?;
        Ok(ValidationReport {
            name: name.to_string(),
            is_new,
            measurements,
        })
    }

    /// Load a JSON file and validate it.
    pub fn validate_file(&self, path: &Path) -> Result<ValidationReport> {
        let doc = load_doc_file(path)?;
        self.validate(&doc)
            .with_context(|| format!("validating {}", path.display()))
    }

    fn check_exists(&self, name: &str) -> bool {
        let exists = self.db.get(name).is_some();
        if !exists {
            log::warn!("Document represents a new/unmatched object: {name}");
        }
        exists
    }

    /// Every measurement needs a value or a distribution, and a reference.
    fn check_values(&self, doc: &GalaxyDoc) -> Result<usize, ValidationError> {
        let mut count = 0;
        for (field, measurements) in &doc.fields {
            if measurements.is_empty() {
                return Err(ValidationError::EmptyField {
                    field: field.clone(),
                });
            }
            for (index, m) in measurements.iter().enumerate() {
                if m.value.is_none() && m.distribution.is_none() {
                    return Err(ValidationError::MissingValue {
                        field: field.clone(),
                        index,
                    });
                }
                if m.reference.trim().is_empty() {
                    return Err(ValidationError::MissingReference {
                        field: field.clone(),
                        index,
                    });
                }
                if self.db.reference(&m.reference).is_none() {
                    log::warn!("{field}[{index}]: reference {} is not in the references file", m.reference);
                }
                count += 1;
            }
        }
        Ok(count)
    }
}

fn check_name(doc: &GalaxyDoc) -> Result<&str, ValidationError> {
    let name = doc.name.trim();
    if name.is_empty() {
        Err(ValidationError::MissingName)
    } else {
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::{Measurement, Reference};

    fn db() -> Database {
        let refs = vec![Reference {
            key: "Martin_2005_1".into(),
            ..Default::default()
        }];
        Database::from_parts(vec![GalaxyDoc::new("Gal 1")], refs)
    }

    #[test]
    fn accepts_complete_document() {
        let db = db();
        let doc = GalaxyDoc::new("Gal 1")
            .with_field("v_mag", vec![Measurement::new(16.0, "Martin_2005_1")]);
        let report = Validator::new(&db).validate(&doc).unwrap();
        assert_eq!(report.name, "Gal 1");
        assert!(!report.is_new);
        assert_eq!(report.measurements, 1);
    }

    #[test]
    fn flags_new_objects() {
        let db = db();
        let doc = GalaxyDoc::new("Gal 7")
            .with_field("v_mag", vec![Measurement::new(16.0, "Unknown_2030_1")]);
        assert!(Validator::new(&db).validate(&doc).unwrap().is_new);
    }

    #[test]
    fn rejects_missing_name() {
        let db = db();
        let doc = GalaxyDoc::new("  ");
        assert_eq!(Validator::new(&db).validate(&doc), Err(ValidationError::MissingName));
    }

    #[test]
    fn rejects_missing_value_and_reference() {
        let db = db();
        let no_value = GalaxyDoc::new("Gal 1").with_field(
            "ebv",
            vec![Measurement {
                reference: "Martin_2005_1".into(),
                ..Default::default()
            }],
        );
        assert_eq!(
            Validator::new(&db).validate(&no_value),
            Err(ValidationError::MissingValue { field: "ebv".into(), index: 0 })
        );

        let no_ref = GalaxyDoc::new("Gal 1").with_field("ebv", vec![Measurement::new(0.1, "")]);
        assert_eq!(
            Validator::new(&db).validate(&no_ref),
            Err(ValidationError::MissingReference { field: "ebv".into(), index: 0 })
        );

        let distribution_only = GalaxyDoc::new("Gal 1").with_field(
            "ebv",
            vec![Measurement {
                distribution: Some(vec![0.1, 0.2]),
                reference: "Martin_2005_1".into(),
                ..Default::default()
            }],
        );
        assert!(Validator::new(&db).validate(&distribution_only).is_ok());
    }

    #[test]
    fn validates_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fix.json");
        std::fs::write(&path, r#"{"v_mag": [{"value": 1, "reference": "Martin_2005_1"}]}"#).unwrap();
        let err = Validator::new(&db()).validate_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("valid name"));
    }
}
