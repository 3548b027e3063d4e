use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value as JsonValue;

use super::error::DatabaseError;
use super::loader::{load_dir, load_doc_file, load_references, save_doc};
use super::model::{GalaxyDoc, Reference};
use super::query::Query;
use super::table::{CatalogRow, CatalogTable};
use super::validator::Validator;
use crate::config::CatalogConfig;

pub use super::table::Selection;

// ---------------------------------------------------------------------------
// Database – in-memory document store
// ---------------------------------------------------------------------------

/// All galaxy documents of a catalog plus its references.
///
/// Every query runs against the current documents, so values changed by
/// [`Database::add_data`] or [`Database::load_doc`] show up in the next
/// query or table without further bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct Database {
    docs: Vec<GalaxyDoc>,
    references: BTreeMap<String, Reference>,
}

impl Database {
    /// Load the data directory and references file named by `config`.
    ///
    /// A missing references file is tolerated (logged); measurements then
    /// simply cannot be resolved to full records.
    pub fn open(config: &CatalogConfig) -> Result<Self> {
        let docs = load_dir(&config.data_dir, Some(&config.references_file))?;
        let references = if config.references_file.exists() {
            load_references(&config.references_file)?
        } else {
            log::warn!(
                "References file {} not found, continuing without references",
                config.references_file.display()
            );
            Vec::new()
        };

        let db = Self::from_parts(docs, references);
        log::info!(
            "Loaded {} galaxies and {} references from {}",
            db.len(),
            db.references.len(),
            config.data_dir.display()
        );
        Ok(db)
    }

    pub fn from_parts(docs: Vec<GalaxyDoc>, references: Vec<Reference>) -> Self {
        let mut db = Self {
            docs: Vec::with_capacity(docs.len()),
            references: references.into_iter().map(|r| (r.key.clone(), r)).collect(),
        };
        for doc in docs {
            db.load_doc(doc);
        }
        db
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn docs(&self) -> &[GalaxyDoc] {
        &self.docs
    }

    /// Look up a galaxy; surrounding whitespace in `name` is ignored.
    pub fn get(&self, name: &str) -> Option<&GalaxyDoc> {
        let name = name.trim();
        self.docs.iter().find(|d| d.name == name)
    }

    // -- References --

    /// Bibliographic record for a reference key.
    pub fn reference(&self, key: &str) -> Option<&Reference> {
        self.references.get(key)
    }

    pub fn references(&self) -> impl Iterator<Item = &Reference> {
        self.references.values()
    }

    /// Every reference key that has a measurement of `field`.
    pub fn reference_keys_for(&self, field: &str) -> BTreeSet<String> {
        self.docs
            .iter()
            .filter_map(|d| d.field(field))
            .flatten()
            .filter(|m| !m.reference.is_empty())
            .map(|m| m.reference.clone())
            .collect()
    }

    // -- Queries --

    /// Documents matching `query`, in database order.
    pub fn query_db(&self, query: &Query) -> Vec<&GalaxyDoc> {
        let hits: Vec<&GalaxyDoc> = self.docs.iter().filter(|d| query.matches(d)).collect();
        log::debug!("query matched {} of {} documents", hits.len(), self.docs.len());
        hits
    }

    /// Matching documents as JSON. With `embed_ref` each measurement's
    /// reference key is replaced by the full record when it is known.
    pub fn query(&self, query: &Query, embed_ref: bool) -> Result<Vec<JsonValue>> {
        self.query_db(query)
            .into_iter()
            .map(|doc| {
                let mut value = serde_json::to_value(doc)
                    .with_context(|| format!("serialising {}", doc.name))?;
                if embed_ref {
                    self.embed_references(&mut value)?;
                }
                Ok(value)
            })
            .collect()
    }

    fn embed_references(&self, doc: &mut JsonValue) -> Result<()> {
        let Some(obj) = doc.as_object_mut() else {
            return Ok(());
        };
        for measurement in obj
            .values_mut()
            .filter_map(JsonValue::as_array_mut)
            .flatten()
        {
            let Some(key) = measurement
                .get("reference")
                .and_then(JsonValue::as_str)
                .map(str::to_owned)
            else {
                continue;
            };
            if let Some(reference) = self.references.get(&key) {
                measurement["reference"] = serde_json::to_value(reference)
                    .with_context(|| format!("serialising reference {key}"))?;
            }
        }
        Ok(())
    }

    /// One row per matching document with one value per field; `selection`
    /// picks the reference to use per column, otherwise the best value.
    pub fn query_table(&self, query: &Query, selection: &Selection) -> CatalogTable {
        let rows = self
            .query_db(query)
            .into_iter()
            .map(|doc| CatalogRow::from_doc(doc, selection))
            .collect();
        CatalogTable::from_rows(rows)
    }

    // -- Mutation --

    /// Insert `doc`, replacing any document with the same name.
    ///
    /// Stored names are always trimmed.
    pub fn load_doc(&mut self, mut doc: GalaxyDoc) {
        canonicalise_name(&mut doc);
        match self.docs.iter_mut().find(|d| d.name == doc.name) {
            Some(existing) => *existing = doc,
            None => self.docs.push(doc),
        }
    }

    /// Read a JSON document from disk and [`load_doc`](Self::load_doc) it.
    pub fn load_doc_file(&mut self, path: &Path) -> Result<()> {
        let doc = load_doc_file(path)?;
        self.load_doc(doc);
        Ok(())
    }

    /// Merge new measurements into the document of the same name.
    ///
    /// With `update_value` each added measurement becomes the best value of
    /// its field. Unknown galaxies are added as new documents.
    pub fn add_data(
        &mut self,
        mut doc: GalaxyDoc,
        update_value: bool,
        validate: bool,
    ) -> Result<(), DatabaseError> {
        canonicalise_name(&mut doc);
        if doc.name.is_empty() {
            return Err(DatabaseError::MissingName);
        }
        if validate {
            Validator::new(self).validate(&doc)?;
        }

        if update_value {
            for m in doc.fields.values_mut().flatten() {
                m.best = Some(1);
            }
        }

        let Some(existing) = self.docs.iter_mut().find(|d| d.name == doc.name) else {
            log::info!("Adding new galaxy {}", doc.name);
            self.docs.push(doc);
            return Ok(());
        };

        for (field, added) in doc.fields {
            let current = existing.fields.entry(field.clone()).or_default();
            if update_value {
                for m in current.iter_mut() {
                    m.best = Some(0);
                }
            }
            log::info!("{}: adding {} measurement(s) of {field}", existing.name, added.len());
            current.extend(added);
        }
        Ok(())
    }

    /// Write the named document into `out_dir`.
    pub fn save_doc(&self, name: &str, out_dir: &Path) -> Result<PathBuf> {
        let doc = self
            .get(name)
            .ok_or_else(|| DatabaseError::UnknownName(name.to_string()))?;
        save_doc(doc, out_dir, None)
    }
}

fn canonicalise_name(doc: &mut GalaxyDoc) {
    let trimmed = doc.name.trim();
    if trimmed.len() != doc.name.len() {
        doc.name = trimmed.to_string();
    }
}
