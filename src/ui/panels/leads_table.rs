// LeadDesk - ui/panels/leads_table.rs
//
// Paginated lead table with sortable headers, inline edit, per-row
// disposition menu, copy-phone and delete, followed by the pagination bar.
//
// Row clicks are collected as `TableAction`s and applied after the grid is
// drawn, so the store is never mutated while a page of rows is on screen.

use crate::app::state::AppState;
use crate::core::model::{Disposition, Lead, SortField};
use crate::core::phone;
use crate::core::query;
use crate::ui::theme;
use crate::util::constants::PAGE_SIZE;

enum TableAction {
    Sort(SortField),
    Edit(String),
    Save,
    Cancel,
    Delete(String),
    SetDisposition(String, Disposition),
    CopyPhone { id: String, phone: String },
    GoToPage(usize),
}

/// Render the table and pagination bar for the current page.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let mut actions: Vec<TableAction> = Vec::new();

    let filtered = state.store.filtered_len();
    if filtered == 0 {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new("No leads match the current search or status filter.")
                    .weak(),
            );
        });
        return;
    }

    // Rows are cloned (one page at most) so the edit buffer can be borrowed
    // mutably while they are drawn.
    let rows: Vec<(Lead, bool)> = state
        .store
        .page_leads()
        .into_iter()
        .map(|lead| (lead.clone(), state.recently_copied(&lead.id)))
        .collect();

    if rows.is_empty() {
        let page = state.store.current_page();
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            ui.label(format!(
                "Page {page} is out of range ({} page(s) available).",
                state.store.total_pages()
            ));
            if ui.button("Back to page 1").clicked() {
                actions.push(TableAction::GoToPage(1));
            }
        });
    } else {
        render_grid(ui, state, &rows, &mut actions);
        ui.add_space(6.0);
        render_pagination(ui, state, &mut actions);
    }

    apply_actions(ui.ctx(), state, actions);
}

fn render_grid(
    ui: &mut egui::Ui,
    state: &mut AppState,
    rows: &[(Lead, bool)],
    actions: &mut Vec<TableAction>,
) {
    let dark = state.store.theme().is_dark();
    let sort_field = state.store.sort_field();
    let sort_direction = state.store.sort_direction();
    let editing = &mut state.editing;

    egui::ScrollArea::both()
        .id_salt("leads_table")
        .auto_shrink([false, true])
        .show(ui, |ui| {
            egui::Grid::new("leads_grid")
                .num_columns(7)
                .striped(true)
                .min_row_height(theme::ROW_HEIGHT)
                .spacing([14.0, 6.0])
                .show(ui, |ui| {
                    // ---- Header row ----
                    for &field in SortField::all() {
                        let arrow = if sort_field == Some(field) {
                            sort_direction.arrow()
                        } else {
                            "\u{21C5}"
                        };
                        let header = egui::Button::new(
                            egui::RichText::new(format!("{} {arrow}", field.label())).strong(),
                        )
                        .frame(false);
                        if ui
                            .add(header)
                            .on_hover_text(format!("Sort by {}", field.label()))
                            .clicked()
                        {
                            actions.push(TableAction::Sort(field));
                        }
                    }
                    ui.strong("Notes");
                    ui.strong("Actions");
                    ui.end_row();

                    // ---- Lead rows ----
                    for (lead, copied) in rows {
                        let draft = editing.as_mut().filter(|d| d.id == lead.id);
                        match draft {
                            Some(draft) => {
                                ui.text_edit_singleline(&mut draft.executive_first_name);
                                ui.text_edit_singleline(&mut draft.company_name);
                                phone_cell(ui, lead, *copied, actions);
                                ui.text_edit_singleline(&mut draft.address);
                                disposition_badge(ui, lead.disposition, dark);
                                ui.text_edit_singleline(&mut draft.notes);
                                ui.horizontal(|ui| {
                                    if ui.button("\u{1F4BE} Save").clicked() {
                                        actions.push(TableAction::Save);
                                    }
                                    if ui.button("\u{2716} Cancel").clicked() {
                                        actions.push(TableAction::Cancel);
                                    }
                                });
                            }
                            None => {
                                ui.label(&lead.executive_first_name);
                                ui.label(&lead.company_name);
                                phone_cell(ui, lead, *copied, actions);
                                ui.label(&lead.address);
                                disposition_menu(ui, lead, dark, actions);
                                ui.label(egui::RichText::new(&lead.notes).weak());
                                ui.horizontal(|ui| {
                                    if ui.button("\u{270F}").on_hover_text("Edit").clicked() {
                                        actions.push(TableAction::Edit(lead.id.clone()));
                                    }
                                    let delete = egui::Button::new(
                                        egui::RichText::new("\u{1F5D1}")
                                            .color(theme::DANGER_COLOUR),
                                    );
                                    if ui.add(delete).on_hover_text("Delete").clicked() {
                                        actions.push(TableAction::Delete(lead.id.clone()));
                                    }
                                });
                            }
                        }
                        ui.end_row();
                    }
                });
        });
}

fn phone_cell(ui: &mut egui::Ui, lead: &Lead, copied: bool, actions: &mut Vec<TableAction>) {
    ui.horizontal(|ui| {
        let mut text = egui::RichText::new(&lead.phone_number).monospace();
        if copied {
            text = text.color(theme::COPIED_COLOUR);
        } else if !phone::is_canonical(&lead.phone_number) {
            text = text.color(theme::NON_CANONICAL_PHONE_COLOUR);
        }
        let label = ui.label(text);
        if !phone::is_canonical(&lead.phone_number) {
            label.on_hover_text("Not a 10-digit North American number in the source file");
        }

        let icon = if copied { "\u{2714}" } else { "\u{1F4CB}" };
        if ui
            .small_button(icon)
            .on_hover_text("Copy phone number")
            .clicked()
        {
            actions.push(TableAction::CopyPhone {
                id: lead.id.clone(),
                phone: lead.phone_number.clone(),
            });
        }
    });
}

fn badge_text(disposition: Disposition, dark: bool) -> egui::RichText {
    egui::RichText::new(disposition.label())
        .color(theme::disposition_colour(disposition, dark))
        .background_color(theme::disposition_bg_colour(disposition))
}

fn disposition_badge(ui: &mut egui::Ui, disposition: Disposition, dark: bool) {
    ui.label(badge_text(disposition, dark));
}

fn disposition_menu(ui: &mut egui::Ui, lead: &Lead, dark: bool, actions: &mut Vec<TableAction>) {
    ui.menu_button(badge_text(lead.disposition, dark), |ui| {
        for &disposition in Disposition::all() {
            let selected = disposition == lead.disposition;
            if ui
                .selectable_label(selected, badge_text(disposition, dark))
                .clicked()
            {
                if !selected {
                    actions.push(TableAction::SetDisposition(lead.id.clone(), disposition));
                }
                ui.close_menu();
            }
        }
    });
}

fn render_pagination(ui: &mut egui::Ui, state: &AppState, actions: &mut Vec<TableAction>) {
    let filtered = state.store.filtered_len();
    let total_pages = state.store.total_pages();
    let page = state.store.current_page();
    let range = state.store.page_range();

    ui.horizontal(|ui| {
        ui.label(format!(
            "Showing {}\u{2013}{} of {filtered} leads",
            range.start + 1,
            range.end
        ));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_enabled(page < total_pages, egui::Button::new("Next \u{25B6}"))
                .clicked()
            {
                actions.push(TableAction::GoToPage(page + 1));
            }

            // Right-to-left layout: add the numbered buttons in reverse.
            let window: Vec<usize> =
                query::page_window(page, total_pages, theme::MAX_PAGE_BUTTONS).collect();
            for &n in window.iter().rev() {
                if ui.selectable_label(n == page, n.to_string()).clicked() && n != page {
                    actions.push(TableAction::GoToPage(n));
                }
            }

            if ui
                .add_enabled(page > 1, egui::Button::new("\u{25C0} Previous"))
                .clicked()
            {
                actions.push(TableAction::GoToPage(page - 1));
            }

            ui.label(format!("Page {page} of {total_pages}"));
            ui.label(egui::RichText::new(format!("{PAGE_SIZE} per page")).weak());
        });
    });
}

fn apply_actions(ctx: &egui::Context, state: &mut AppState, actions: Vec<TableAction>) {
    for action in actions {
        match action {
            TableAction::Sort(field) => state.store.set_sorting(field),
            TableAction::Edit(id) => state.begin_edit(&id),
            TableAction::Save => state.save_edit(),
            TableAction::Cancel => state.cancel_edit(),
            TableAction::Delete(id) => state.request_delete(&id),
            TableAction::SetDisposition(id, disposition) => {
                state.set_disposition(&id, disposition)
            }
            TableAction::CopyPhone { id, phone } => {
                ctx.copy_text(phone);
                state.mark_copied(&id);
            }
            TableAction::GoToPage(page) => state.store.set_current_page(page),
        }
    }
}
