/// Catalog layer: documents, loading, queries and the flattened table.
///
/// Architecture:
/// ```text
///  data/*.json + references.json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse files → GalaxyDoc / Reference
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Database  │  in-memory docs, add_data / load_doc, validator
///   └──────────┘
///        │  query (filter language)
///        ▼
///   ┌──────────────┐
///   │ CatalogTable  │  one preferred value per field and galaxy
///   └──────────────┘
/// ```

pub mod database;
pub mod error;
pub mod import;
pub mod loader;
pub mod model;
pub mod query;
pub mod table;
pub mod units;
pub mod validator;

pub use database::Database;
pub use error::{DatabaseError, QueryError, ValidationError};
pub use model::{GalaxyDoc, Measurement, Reference};
pub use query::Query;
pub use table::{CatalogRow, CatalogTable, Cell, Selection};
