use eframe::egui::{self, Color32, Ui};

use sheetview::data::export::ExportFormat;
use sheetview::state::AppState;

// ---------------------------------------------------------------------------
// Download modal
// ---------------------------------------------------------------------------

/// Render the download window while it is open.
pub fn download_modal(ctx: &egui::Context, state: &mut AppState) {
    if !state.download.open {
        return;
    }

    let mut open = true;
    let mut confirmed = false;
    let mut cancelled = false;

    egui::Window::new("Download")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .open(&mut open)
        .show(ctx, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                ui.label("File name:");
                ui.add(egui::TextEdit::singleline(&mut state.download.filename).desired_width(160.0));
            });

            ui.horizontal(|ui: &mut Ui| {
                ui.label("Format:");
                egui::ComboBox::from_id_salt("export_format")
                    .selected_text(state.download.format.as_str())
                    .show_ui(ui, |ui: &mut Ui| {
                        for format in ExportFormat::ALL {
                            let text = if format.is_supported() {
                                format.as_str().to_string()
                            } else {
                                format!("{format} (not supported)")
                            };
                            ui.selectable_value(&mut state.download.format, format, text);
                        }
                    });
            });

            ui.horizontal(|ui: &mut Ui| {
                ui.label(format!("Folder: {}", state.export_dir.display()));
                if ui.small_button("Browse…").clicked() {
                    if let Some(dir) = rfd::FileDialog::new()
                        .set_title("Export folder")
                        .set_directory(&state.export_dir)
                        .pick_folder()
                    {
                        state.export_dir = dir;
                    }
                }
            });

            if !state.download.format.is_supported() {
                ui.colored_label(Color32::YELLOW, "This format cannot be exported yet.");
            }

            ui.separator();
            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Download").clicked() {
                    confirmed = true;
                }
                if ui.button("Cancel").clicked() {
                    cancelled = true;
                }
            });
        });

    if confirmed {
        if let Err(e) = state.download() {
            log::debug!("Download did not complete: {e}");
        }
    } else if cancelled || !open {
        state.close_download_modal();
    }
}
