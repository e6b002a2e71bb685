use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct NutriPlotApp {
    pub state: AppState,
}

impl NutriPlotApp {
    pub fn new(state: AppState) -> Self {
        NutriPlotApp { state }
    }
}

impl Default for NutriPlotApp {
    fn default() -> Self {
        NutriPlotApp::new(AppState::default())
    }
}

impl eframe::App for NutriPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: search + view controls ----
        egui::SidePanel::left("control_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::scatter(ui, &self.state);
        });
    }
}
