use eframe::egui;

use sheetview::state::AppState;

use crate::ui::{download, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SheetViewApp {
    pub state: AppState,
}

impl SheetViewApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SheetViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: apply-operation form ----
        egui::SidePanel::left("operation_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: sheet ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::sheet_table(ui, &self.state);
        });

        // ---- Download modal ----
        download::download_modal(ctx, &mut self.state);
    }
}
