use eframe::egui::{self, Color32, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoint, Points, Text};

use galcat::analysis::derived::{radius_mass_series, scaling_points, sky_points, velocity_points};
use galcat::analysis::scene::normalize;
use galcat::catalog::CatalogTable;

use crate::color::{ColorRamp, BASE, HIGHLIGHT};
use crate::state::{AppState, PlotKind};

/// Colour bins for the 3D view.
const RAMP_BINS: usize = 8;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render whichever view is selected in the central panel.
pub fn central_view(ui: &mut Ui, state: &AppState) {
    if state.database.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a catalog directory to begin  (File → Open catalog…)");
        });
        return;
    }

    match state.plot_kind {
        PlotKind::SkyMap => sky_map(ui, state),
        PlotKind::VelocityDistance => velocity_plot(ui, state),
        PlotKind::RadiusMass => radius_mass_plot(ui, state),
        PlotKind::Scaling3d => scaling_plot(ui, state),
        PlotKind::Table => table_view(ui, &state.table),
    }
}

fn sky_map(ui: &mut Ui, state: &AppState) {
    let points = sky_points(&state.derived);
    Plot::new("sky_map")
        .legend(Legend::default())
        .x_axis_label("RA [deg]")
        .y_axis_label("Dec [deg]")
        .data_aspect(1.0)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points)
                    .name("galaxies")
                    .radius(3.0)
                    .color(BASE),
            );
        });
}

fn velocity_plot(ui: &mut Ui, state: &AppState) {
    let points = velocity_points(&state.derived);
    Plot::new("velocity_distance")
        .legend(Legend::default())
        .x_axis_label("Distance [kpc]")
        .y_axis_label("Radial velocity [km/s]")
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points)
                    .name("galaxies")
                    .radius(3.0)
                    .color(BASE),
            );
        });
}

/// Log-log half-light radius vs Wolf mass, optionally highlighting one
/// galaxy by name.
fn radius_mass_plot(ui: &mut Ui, state: &AppState) {
    let highlight = state.highlight_name();
    let series = radius_mass_series(&state.derived, highlight);

    Plot::new("radius_mass")
        .legend(Legend::default())
        .x_axis_label("log10 r_h [pc]")
        .y_axis_label("log10 M_dyn [M☉]")
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(series.base)
                    .name("galaxies")
                    .radius(3.0)
                    .color(BASE),
            );
            if let (Some(name), Some(&[x, y])) = (highlight, series.highlighted.first()) {
                plot_ui.text(
                    Text::new(PlotPoint::new(x, y + 0.1), name).color(HIGHLIGHT),
                );
            }
            plot_ui.points(
                Points::new(series.highlighted)
                    .name(highlight.unwrap_or("highlight"))
                    .shape(MarkerShape::Diamond)
                    .radius(6.0)
                    .color(HIGHLIGHT),
            );
        });
}

/// Rotating (log r_h, log M_dyn, log M_*) cloud, coloured by absolute
/// magnitude.
fn scaling_plot(ui: &mut Ui, state: &AppState) {
    let points = scaling_points(&state.derived);
    let cube = normalize(&points.iter().map(|p| p.xyz).collect::<Vec<_>>());
    let ramp = ColorRamp::new(points.iter().map(|p| p.abs_mag), RAMP_BINS);
    let camera = state.camera();

    let mut bins: Vec<Vec<[f64; 2]>> = vec![Vec::new(); ramp.bins()];
    for (p, xyz) in points.iter().zip(&cube) {
        bins[ramp.bin_for(p.abs_mag)].push(camera.project(*xyz));
    }

    let axes = [
        ([1.2, 0.0, 0.0], "log r_h"),
        ([0.0, 1.2, 0.0], "log M_dyn"),
        ([0.0, 0.0, 1.2], "log M_*"),
    ];
    let (lo, hi) = ramp.range();

    ui.label(format!(
        "azimuth {:.0}°, colour: M_V from {lo:.1} (blue) to {hi:.1} (red)",
        camera.azimuth
    ));
    Plot::new("scaling_3d")
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .show(ui, |plot_ui| {
            for (end, label) in axes {
                let tip = camera.project(end);
                plot_ui.line(Line::new(vec![[0.0, 0.0], tip]).color(Color32::GRAY));
                plot_ui.text(Text::new(PlotPoint::new(tip[0], tip[1]), label));
            }
            for (bin, pts) in bins.into_iter().enumerate() {
                if pts.is_empty() {
                    continue;
                }
                plot_ui.points(Points::new(pts).radius(3.5).color(ramp.color(bin)));
            }
        });
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

fn table_view(ui: &mut Ui, table: &CatalogTable) {
    egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .column(Column::auto().at_least(120.0))
            .columns(Column::auto().at_least(70.0), table.columns.len())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("name");
                });
                for col in &table.columns {
                    let label = match table.unit_of(col) {
                        Some(unit) => format!("{col} [{unit}]"),
                        None => col.clone(),
                    };
                    header.col(|ui| {
                        ui.strong(label);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, table.len(), |mut row| {
                    let r = &table.rows[row.index()];
                    row.col(|ui| {
                        ui.label(&r.name);
                    });
                    for col in &table.columns {
                        let text = r
                            .value(col)
                            .map(|v| format!("{v:.4}"))
                            .unwrap_or_else(|| "–".to_string());
                        row.col(|ui| {
                            ui.label(text);
                        });
                    }
                });
            });
    });
}
