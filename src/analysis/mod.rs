/// Analysis layer: turns a [`CatalogTable`](crate::catalog::CatalogTable)
/// into physical quantities and plot-ready series.
///
/// ```text
///   CatalogTable ──derive──▶ Vec<DerivedRow> ──▶ sky / velocity / radius-mass / 3D series
///                  (validity: one rule for missing data)
/// ```

pub mod derived;
pub mod physics;
pub mod scene;
pub mod validity;

pub use derived::{derive, DerivedRow, RadiusMassSeries};
