// LeadDesk - ui/panels/dialogs.rs
//
// Confirmation and notice windows: delete one lead, clear all leads, and the
// blocking notice shown after a failed import.
// Each is a centred, non-collapsible window driven by a flag on AppState.

use crate::app::state::AppState;
use crate::ui::theme;

/// Render every dialog whose flag is set.
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    render_delete_confirm(ctx, state);
    render_clear_confirm(ctx, state);
    render_import_error(ctx, state);
}

fn render_delete_confirm(ctx: &egui::Context, state: &mut AppState) {
    let Some(id) = state.pending_delete.clone() else {
        return;
    };
    let name = state
        .store
        .find(&id)
        .map(|l| l.executive_first_name.clone())
        .unwrap_or_default();

    let mut open = true;
    let mut confirmed = false;
    let mut cancelled = false;
    egui::Window::new("Delete lead")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            if name.is_empty() {
                ui.label("Delete this lead?");
            } else {
                ui.label(format!("Delete the lead for {name}?"));
            }
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let delete =
                    egui::Button::new(egui::RichText::new("Delete").color(theme::DANGER_COLOUR));
                if ui.add(delete).clicked() {
                    confirmed = true;
                }
                if ui.button("Cancel").clicked() {
                    cancelled = true;
                }
            });
        });

    if confirmed {
        state.confirm_delete();
    } else if cancelled || !open {
        state.pending_delete = None;
    }
}

fn render_clear_confirm(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_clear_confirm {
        return;
    }
    let total = state.store.leads().len();

    let mut open = true;
    let mut confirmed = false;
    let mut cancelled = false;
    egui::Window::new("Clear all leads")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(format!(
                "Are you sure you want to remove all {total} leads? This action cannot be undone."
            ));
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let clear = egui::Button::new(
                    egui::RichText::new("Remove all").color(theme::DANGER_COLOUR),
                );
                if ui.add(clear).clicked() {
                    confirmed = true;
                }
                if ui.button("Cancel").clicked() {
                    cancelled = true;
                }
            });
        });

    if confirmed {
        state.confirm_clear_all();
    } else if cancelled || !open {
        state.show_clear_confirm = false;
    }
}

fn render_import_error(ctx: &egui::Context, state: &mut AppState) {
    let Some(message) = state.import_error.clone() else {
        return;
    };

    let mut open = true;
    let mut dismissed = false;
    egui::Window::new("Import failed")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .min_width(360.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(message);
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new("No leads were added. Fix the file and import it again.")
                    .weak(),
            );
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed || !open {
        state.import_error = None;
    }
}
