// LeadDesk - ui/panels/dashboard.rs
//
// Summary strip above the table: one card for the total and one per
// disposition, each with a share-of-total bar. Counts always cover the whole
// collection, not the filtered view.

use crate::app::state::AppState;
use crate::core::model::Disposition;
use crate::ui::theme;

pub fn render(ui: &mut egui::Ui, state: &AppState) {
    let stats = state.store.stats();
    let dark = state.store.theme().is_dark();

    ui.horizontal_wrapped(|ui| {
        stat_card(ui, "Total Leads", stats.total, 100.0, theme::TOTAL_COLOUR);
        for &disposition in Disposition::all() {
            stat_card(
                ui,
                disposition.label(),
                stats.count(disposition),
                stats.percentage(disposition),
                theme::disposition_colour(disposition, dark),
            );
        }
    });
}

fn stat_card(ui: &mut egui::Ui, label: &str, value: usize, percentage: f32, colour: egui::Color32) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(10))
        .show(ui, |ui| {
            ui.set_width(theme::STAT_CARD_WIDTH);
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(label).small().weak());
                ui.label(
                    egui::RichText::new(value.to_string())
                        .size(26.0)
                        .strong()
                        .color(colour),
                );
                ui.add(
                    egui::ProgressBar::new(percentage / 100.0)
                        .desired_height(4.0)
                        .fill(colour),
                )
                .on_hover_text(format!("{percentage:.1}% of all leads"));
            });
        });
}
