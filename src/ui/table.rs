use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use sheetview::state::AppState;
use sheetview::view::EMPTY_MESSAGE;

const HIGHLIGHT: Color32 = Color32::from_rgb(255, 255, 224);
const ROW_HEIGHT: f32 = 20.0;

// ---------------------------------------------------------------------------
// Sheet table (central panel)
// ---------------------------------------------------------------------------

/// Render the current view in the central panel.
pub fn sheet_table(ui: &mut Ui, state: &AppState) {
    if state.source_label.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view a sheet  (File → Open…)");
        });
        return;
    }

    let view = &state.view;
    if view.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(EMPTY_MESSAGE);
        });
        return;
    }

    let labels = view.header();

    egui::ScrollArea::horizontal()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let mut table = TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::auto().at_least(32.0));
            for _ in labels {
                table = table.column(Column::auto().at_least(80.0).clip(true));
            }

            table
                .header(ROW_HEIGHT, |mut header| {
                    header.col(|ui| {
                        ui.strong("#");
                    });
                    for label in labels {
                        header.col(|ui| {
                            ui.strong(label.to_string());
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, view.displayed_rows().len(), |mut row| {
                        let index = row.index();
                        row.col(|ui| {
                            ui.weak((index + 1).to_string());
                        });
                        for (&label, text) in labels.iter().zip(view.cell_texts(index)) {
                            row.col(|ui| {
                                if view.is_marked(index, label) {
                                    ui.painter().rect_filled(ui.max_rect(), 0.0, HIGHLIGHT);
                                    ui.label(RichText::new(text).color(Color32::BLACK));
                                } else {
                                    ui.label(text);
                                }
                            });
                        }
                    });
                });
        });
}
