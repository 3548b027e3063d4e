use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use super::model::{GalaxyDoc, Reference};

// ---------------------------------------------------------------------------
// Data directory
// ---------------------------------------------------------------------------

/// Load every galaxy document in `dir`.
///
/// Hidden files, anything not ending in `.json` and `exclude` (a references
/// file kept inside the data directory) are skipped. Files are read in name
/// order so the database order is stable across platforms.
pub fn load_dir(dir: &Path, exclude: Option<&Path>) -> Result<Vec<GalaxyDoc>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("reading data directory {}", dir.display()))?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("listing {}", dir.display()))?;
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();
        if name.starts_with('.') || !name.ends_with(".json") {
            continue;
        }
        let path = entry.path();
        if exclude.is_some_and(|ex| same_file(ex, &path)) {
            continue;
        }
        paths.push(path);
    }
    paths.sort();

    paths.iter().map(|p| load_doc_file(p)).collect()
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Parse one galaxy JSON document.
pub fn load_doc_file(path: &Path) -> Result<GalaxyDoc> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

// ---------------------------------------------------------------------------
// References file
// ---------------------------------------------------------------------------

/// Expected layout: a top-level array of reference records.
///
/// ```json
/// [
///   {"key": "Bellazzini_2006_1", "id": 1, "year": 2006,
///    "bibcode": "2006MNRAS.366..865B", "authors": ["Bellazzini, M."], ...}
/// ]
/// ```
pub fn load_references(path: &Path) -> Result<Vec<Reference>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading references file {}", path.display()))?;
    let refs: Vec<Reference> = serde_json::from_str(&text)
        .with_context(|| format!("parsing references file {}", path.display()))?;

    if let Some(blank) = refs.iter().position(|r| r.key.trim().is_empty()) {
        bail!("{}: reference #{blank} has an empty key", path.display());
    }
    Ok(refs)
}

// ---------------------------------------------------------------------------
// Saving
// ---------------------------------------------------------------------------

/// Pretty-print `doc` (4-space indent) into `out_dir`.
///
/// `name` overrides the default file name from [`GalaxyDoc::file_name`].
pub fn save_doc(doc: &GalaxyDoc, out_dir: &Path, name: Option<&str>) -> Result<PathBuf> {
    let file_name = match name {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => doc.file_name(),
    };
    let path = out_dir.join(file_name);

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    serde::Serialize::serialize(doc, &mut ser)
        .with_context(|| format!("serialising {}", doc.name))?;

    std::fs::write(&path, buf).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Saved {} to {}", doc.name, path.display());
    Ok(path)
}
