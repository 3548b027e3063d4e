use eframe::egui;

use crate::state::{AppState, PlotKind};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct GalcatApp {
    pub state: AppState,
}

impl GalcatApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for GalcatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Advance the 3D camera while its view is visible.
        if self.state.plot_kind == PlotKind::Scaling3d && self.state.animate {
            let dt = ctx.input(|i| i.stable_dt) as f64;
            self.state.turntable.advance(dt);
            ctx.request_repaint();
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: query, sources, plot choice ----
        egui::SidePanel::left("query_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: plot or table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::central_view(ui, &self.state);
        });
    }
}
