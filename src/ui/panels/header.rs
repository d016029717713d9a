// LeadDesk - ui/panels/header.rs
//
// Top bar: app title, search box, status filter, import/export/clear-all
// actions, theme toggle and About button.
// File dialogs for import are opened here; export is raised as a request
// flag and handled by gui.rs.

use crate::app::state::AppState;
use crate::core::export::ExportFormat;
use crate::core::model::DispositionFilter;
use crate::ui::theme;
use crate::util::constants::{APP_NAME, DELIMITED_EXTENSIONS, SPREADSHEET_EXTENSIONS};

/// Render the header bar.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading(egui::RichText::new(APP_NAME).strong());
        ui.add_space(16.0);

        render_search(ui, state);
        render_status_filter(ui, state);

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .button("\u{2139}")
                .on_hover_text("About LeadDesk")
                .clicked()
            {
                state.show_about = true;
            }

            let theme_label = if state.store.theme().is_dark() {
                "\u{263C} Light"
            } else {
                "\u{263E} Dark"
            };
            if ui
                .button(theme_label)
                .on_hover_text("Toggle theme")
                .clicked()
            {
                state.store.toggle_theme();
            }

            let has_leads = !state.store.leads().is_empty();

            ui.add_enabled_ui(has_leads, |ui| {
                let clear = egui::Button::new(
                    egui::RichText::new("\u{1F5D1} Clear All").color(theme::DANGER_COLOUR),
                );
                if ui.add(clear).clicked() {
                    state.show_clear_confirm = true;
                }
            });

            ui.add_enabled_ui(has_leads, |ui| {
                ui.menu_button("\u{2B07} Export", |ui| {
                    if ui.button("Excel workbook (.xlsx)\u{2026}").clicked() {
                        state.pending_export = Some(ExportFormat::Xlsx);
                        ui.close_menu();
                    }
                    if ui.button("CSV (.csv)\u{2026}").clicked() {
                        state.pending_export = Some(ExportFormat::Csv);
                        ui.close_menu();
                    }
                });
            });

            ui.add_enabled_ui(!state.import_in_progress, |ui| {
                if ui.button("\u{2B06} Import\u{2026}").clicked() {
                    if let Some(path) = pick_import_file() {
                        state.pending_import = Some(path);
                    }
                }
            });
        });
    });
}

fn render_search(ui: &mut egui::Ui, state: &mut AppState) {
    let mut query = state.store.search_query().to_string();
    let response = ui.add(
        egui::TextEdit::singleline(&mut query)
            .hint_text("\u{1F50D} Search leads...")
            .desired_width(theme::SEARCH_BOX_WIDTH),
    );
    if response.changed() {
        state.store.set_search_query(query);
    }
}

fn render_status_filter(ui: &mut egui::Ui, state: &mut AppState) {
    let current = state.store.selected_disposition();
    let mut selected = current;
    egui::ComboBox::from_id_salt("status_filter")
        .selected_text(current.label())
        .show_ui(ui, |ui| {
            for option in DispositionFilter::options() {
                ui.selectable_value(&mut selected, option, option.label());
            }
        });
    if selected != current {
        state.store.set_selected_disposition(selected);
    }
}

/// Native open dialog restricted to the supported import formats.
pub fn pick_import_file() -> Option<std::path::PathBuf> {
    let mut all: Vec<&str> = SPREADSHEET_EXTENSIONS.to_vec();
    all.extend_from_slice(DELIMITED_EXTENSIONS);
    rfd::FileDialog::new()
        .add_filter("Lead files", &all)
        .add_filter("Spreadsheets", SPREADSHEET_EXTENSIONS)
        .add_filter("CSV / text", DELIMITED_EXTENSIONS)
        .pick_file()
}
