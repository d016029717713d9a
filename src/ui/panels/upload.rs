// LeadDesk - ui/panels/upload.rs
//
// File import drop zone. Shown full-size with a welcome message while the
// collection is empty, and as a compact "Add More Leads" strip below the
// table otherwise. Actual file drops are handled window-wide in gui.rs.

use crate::app::state::AppState;
use crate::ui::panels::header::pick_import_file;
use crate::util::constants::{ADDRESS_HEADERS, COMPANY_HEADERS, NAME_HEADERS, PHONE_HEADERS};

/// Full welcome panel for an empty collection.
pub fn render_welcome(ui: &mut egui::Ui, state: &mut AppState) {
    ui.add_space(40.0);
    ui.vertical_centered(|ui| {
        drop_zone(ui, state, 160.0);

        ui.add_space(24.0);
        ui.heading("Welcome to LeadDesk");
        ui.add_space(6.0);
        ui.label(
            "Import your Excel or CSV file containing lead information to get started.",
        );
        ui.label(format!(
            "Recognised columns: {}, {}, {}, {}.",
            PHONE_HEADERS[0], NAME_HEADERS[0], ADDRESS_HEADERS[0], COMPANY_HEADERS[0]
        ));
        ui.label(
            egui::RichText::new(
                "Snake-case headers (phone_number, executive_first_name, ...) work too.",
            )
            .small()
            .weak(),
        );
    });
}

/// Compact import strip shown below the table.
pub fn render_add_more(ui: &mut egui::Ui, state: &mut AppState) {
    ui.strong("Add More Leads");
    drop_zone(ui, state, 70.0);
}

fn drop_zone(ui: &mut egui::Ui, state: &mut AppState, height: f32) {
    let hovering = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());
    let stroke_colour = if hovering {
        ui.visuals().selection.stroke.color
    } else {
        ui.visuals().widgets.noninteractive.bg_stroke.color
    };

    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(2.0, stroke_colour))
        .inner_margin(egui::Margin::same(16))
        .show(ui, |ui| {
            ui.set_min_height(height);
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                if state.import_in_progress {
                    ui.add(egui::Spinner::new());
                    ui.label("Importing\u{2026}");
                    return;
                }
                ui.label(
                    egui::RichText::new("\u{1F4C4} Drop your Excel or CSV file here").strong(),
                );
                if ui.button("or click to browse\u{2026}").clicked() {
                    if let Some(path) = pick_import_file() {
                        state.pending_import = Some(path);
                    }
                }
            });
        });
}
