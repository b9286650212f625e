use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use sheetview::data::classify::ContentType;
use sheetview::data::predicate::Operation;
use sheetview::data::query::FilterScope;
use sheetview::data::source::{FileSource, SampleSource};
use sheetview::state::{AppState, Status};

// ---------------------------------------------------------------------------
// Left side panel – apply-operation form
// ---------------------------------------------------------------------------

/// Render the left operation panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Operation");
    ui.separator();

    if state.source_label.is_none() {
        ui.label("No sheet loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let form = &mut state.form;

            ui.strong("Primary column");
            ui.text_edit_singleline(&mut form.primary_column);

            ui.strong("Range columns");
            ui.add(egui::TextEdit::singleline(&mut form.range_columns).hint_text("A, C"));

            ui.strong("Row range");
            ui.horizontal(|ui: &mut Ui| {
                ui.add(egui::TextEdit::singleline(&mut form.row_from).desired_width(48.0));
                ui.label("to");
                ui.add(egui::TextEdit::singleline(&mut form.row_to).desired_width(48.0));
            });

            ui.strong("Operation type");
            ui.text_edit_singleline(&mut form.operation_type);

            ui.separator();

            ui.strong("Operation");
            egui::ComboBox::from_id_salt("operation")
                .selected_text(form.operation.as_str())
                .show_ui(ui, |ui: &mut Ui| {
                    for op in Operation::ALL {
                        ui.selectable_value(&mut form.operation, op, op.as_str());
                    }
                });

            ui.strong("Content type");
            egui::ComboBox::from_id_salt("content_type")
                .selected_text(form.content_type.as_str())
                .show_ui(ui, |ui: &mut Ui| {
                    for ct in ContentType::ALL {
                        ui.selectable_value(&mut form.content_type, ct, ct.as_str());
                    }
                });

            ui.strong("Filter by");
            egui::ComboBox::from_id_salt("scope")
                .selected_text(form.scope.as_str())
                .show_ui(ui, |ui: &mut Ui| {
                    for scope in FilterScope::ALL {
                        ui.selectable_value(&mut form.scope, scope, scope.as_str());
                    }
                });

            ui.separator();

            if ui.button("Apply").clicked() {
                if let Err(e) = state.apply_operation() {
                    log::debug!("Apply left the view unchanged: {e}");
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Load sample").clicked() {
                state.load(&SampleSource);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(label) = &state.source_label {
            ui.label(format!(
                "{label}: {} rows loaded, {} displayed",
                state.dataset.len(),
                state.visible_indices.len()
            ));
            ui.separator();
            if ui.button("Download…").clicked() {
                state.open_download_modal();
            }
        }

        match &state.status {
            Some(Status::Info(msg)) => {
                ui.label(msg);
            }
            Some(Status::Error(msg)) => {
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sheet")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load(&FileSource::new(path));
    }
}
