use galcat::analysis::scene::{Camera, Turntable};
use galcat::analysis::{derive, DerivedRow};
use galcat::catalog::{CatalogTable, Database, Query, Selection};
use galcat::config::CatalogConfig;

// ---------------------------------------------------------------------------
// Plot choice
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotKind {
    SkyMap,
    VelocityDistance,
    RadiusMass,
    Scaling3d,
    Table,
}

impl PlotKind {
    pub const ALL: [PlotKind; 5] = [
        PlotKind::SkyMap,
        PlotKind::VelocityDistance,
        PlotKind::RadiusMass,
        PlotKind::Scaling3d,
        PlotKind::Table,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PlotKind::SkyMap => "Sky map",
            PlotKind::VelocityDistance => "Velocity vs distance",
            PlotKind::RadiusMass => "Radius vs mass",
            PlotKind::Scaling3d => "Scaling relation (3D)",
            PlotKind::Table => "Table",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: CatalogConfig,

    /// Loaded catalog (None until a directory is opened successfully).
    pub database: Option<Database>,

    /// Result of the current query with the current selection.
    pub table: CatalogTable,

    /// Derived quantities for `table`, row for row.
    pub derived: Vec<DerivedRow>,

    /// Filter query as typed by the user (JSON).
    pub query_text: String,

    /// Preferred reference per column.
    pub selection: Selection,

    /// Galaxy to pick out in the radius/mass plot; empty for none.
    pub highlight: String,

    pub plot_kind: PlotKind,

    /// Rotation of the 3D view and whether it is running.
    pub turntable: Turntable,
    pub animate: bool,
    pub elevation: f64,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            config,
            database: None,
            table: CatalogTable::default(),
            derived: Vec::new(),
            query_text: String::new(),
            selection: Selection::new(),
            highlight: String::new(),
            plot_kind: PlotKind::SkyMap,
            turntable: Turntable::default(),
            animate: true,
            elevation: Camera::default().elevation,
            status_message: None,
        }
    }

    /// Load the catalog named by `config` and run the current query on it.
    pub fn open_catalog(&mut self, config: CatalogConfig) {
        match Database::open(&config) {
            Ok(db) => {
                self.database = Some(db);
                self.config = config;
                self.status_message = None;
                self.requery();
            }
            Err(e) => {
                log::error!("Failed to open catalog: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Re-read the catalog from disk, picking up edited or added files.
    pub fn reload(&mut self) {
        self.open_catalog(self.config.clone());
    }

    /// Re-run the query and recompute derived quantities.
    pub fn requery(&mut self) {
        let Some(db) = &self.database else {
            return;
        };
        match self.query_text.parse::<Query>() {
            Ok(query) => {
                self.table = db.query_table(&query, &self.selection);
                self.derived = derive(&self.table);
                self.status_message = None;
                log::info!("Query returned {} of {} galaxies", self.table.len(), db.len());
            }
            Err(e) => {
                log::warn!("Bad query: {e}");
                self.status_message = Some(format!("Query error: {e}"));
            }
        }
    }

    /// Prefer `reference` for `column`, or the best value when `None`.
    pub fn set_selection(&mut self, column: &str, reference: Option<String>) {
        match reference {
            Some(r) => self.selection.insert(column.to_string(), r),
            None => self.selection.remove(column),
        };
        self.requery();
    }

    pub fn highlight_name(&self) -> Option<&str> {
        let name = self.highlight.trim();
        (!name.is_empty()).then_some(name)
    }

    pub fn camera(&self) -> Camera {
        Camera {
            azimuth: self.turntable.azimuth(),
            elevation: self.elevation,
        }
    }
}
