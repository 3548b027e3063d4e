//! Galaxy catalog database, derived-quantity analysis and table export.
//!
//! The `galcat` binary wraps this library in an egui viewer; `import_dat`
//! turns the fixed-width source catalog into per-galaxy JSON documents.

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod export;
