use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use galcat::config::CatalogConfig;
use galcat::export::export_table;

use crate::state::{AppState, PlotKind};

// ---------------------------------------------------------------------------
// Left side panel – query, plot choice, sources
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Query");
    ui.separator();

    if state.database.is_none() {
        ui.label("No catalog loaded.");
        return;
    }

    ui.add(
        egui::TextEdit::multiline(&mut state.query_text)
            .code_editor()
            .desired_rows(3)
            .hint_text(r#"{"v_mag.value": {"$lt": 21}}"#),
    );
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Run").clicked() {
            state.requery();
        }
        if ui.button("Clear").clicked() {
            state.query_text.clear();
            state.requery();
        }
    });
    ui.separator();

    // ---- Plot selector ----
    ui.strong("View");
    for kind in PlotKind::ALL {
        ui.radio_value(&mut state.plot_kind, kind, kind.label());
    }
    ui.separator();

    match state.plot_kind {
        PlotKind::RadiusMass => highlight_picker(ui, state),
        PlotKind::Scaling3d => {
            ui.checkbox(&mut state.animate, "Rotate");
            ui.add(egui::Slider::new(&mut state.elevation, -90.0..=90.0).text("elevation"));
        }
        _ => {}
    }
    ui.separator();

    source_selectors(ui, state);
}

fn highlight_picker(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Highlight");
    let names: Vec<String> = state.table.names().map(str::to_string).collect();
    let current = state.highlight_name().unwrap_or("(none)").to_string();
    egui::ComboBox::from_id_salt("highlight")
        .selected_text(current)
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(state.highlight.is_empty(), "(none)").clicked() {
                state.highlight.clear();
            }
            for name in &names {
                if ui.selectable_label(state.highlight == *name, name).clicked() {
                    state.highlight = name.clone();
                }
            }
        });
}

/// One combo box per column that has more than one source in the catalog.
fn source_selectors(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Sources");
    let Some(db) = &state.database else {
        return;
    };
    let choices: Vec<(String, Vec<String>)> = state
        .table
        .columns
        .iter()
        .map(|col| (col.clone(), db.reference_keys_for(col).into_iter().collect::<Vec<_>>()))
        .filter(|(_, refs)| refs.len() > 1)
        .collect();

    if choices.is_empty() {
        ui.label("Every field has a single source.");
        return;
    }

    let mut change: Option<(String, Option<String>)> = None;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (col, refs) in &choices {
                let current = state.selection.get(col).cloned();
                egui::ComboBox::from_label(col)
                    .selected_text(current.as_deref().unwrap_or("best"))
                    .show_ui(ui, |ui: &mut Ui| {
                        if ui.selectable_label(current.is_none(), "best").clicked() {
                            change = Some((col.clone(), None));
                        }
                        for r in refs {
                            let selected = current.as_deref() == Some(r.as_str());
                            if ui.selectable_label(selected, r).clicked() {
                                change = Some((col.clone(), Some(r.clone())));
                            }
                        }
                    });
            }
        });

    if let Some((col, reference)) = change {
        state.set_selection(&col, reference);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open catalog…").clicked() {
                open_catalog_dialog(state);
                ui.close_menu();
            }
            let has_rows = !state.table.is_empty();
            if ui.add_enabled(has_rows, egui::Button::new("Export table…")).clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        if ui.button("Reload").clicked() {
            state.reload();
        }

        ui.separator();

        if let Some(db) = &state.database {
            ui.label(format!(
                "{} galaxies loaded, {} matching, {} references",
                db.len(),
                state.table.len(),
                db.references().count()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_catalog_dialog(state: &mut AppState) {
    let dir = rfd::FileDialog::new()
        .set_title("Open galaxy data directory")
        .pick_folder();

    if let Some(dir) = dir {
        state.open_catalog(CatalogConfig::for_data_dir(&dir));
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export table")
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .set_file_name("galaxies.csv")
        .save_file();

    if let Some(path) = file {
        if let Err(e) = export_table(&state.table, &path) {
            log::error!("Failed to export table: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
