// LeadDesk - gui.rs
//
// Top-level eframe::App implementation.
// Wires together all UI panels and manages the import lifecycle.

use crate::app::import::ImportManager;
use crate::app::state::AppState;
use crate::core::export::{self, ExportFormat};
use crate::core::model::Theme;
use crate::ui;
use std::path::PathBuf;

/// The LeadDesk application.
pub struct LeadDeskApp {
    pub state: AppState,
    pub import_manager: ImportManager,

    /// Theme and font size last pushed into the egui context.
    applied_style: Option<(Theme, f32)>,
}

impl LeadDeskApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            import_manager: ImportManager::new(),
            applied_style: None,
        }
    }

    fn start_import(&mut self, path: PathBuf) {
        match self.import_manager.start_import(path) {
            Ok(()) => self.state.import_in_progress = true,
            Err(busy) => {
                self.state.status_message = format!("Import not started: {busy}.");
            }
        }
    }

    fn run_export(&mut self, format: ExportFormat) {
        if self.state.store.leads().is_empty() {
            return;
        }
        let default_name =
            export::default_export_file_name(chrono::Utc::now().date_naive(), format);
        let (filter_name, ext) = match format {
            ExportFormat::Xlsx => ("Excel workbook", "xlsx"),
            ExportFormat::Csv => ("CSV", "csv"),
        };
        if let Some(dest) = rfd::FileDialog::new()
            .add_filter(filter_name, &[ext])
            .set_file_name(default_name)
            .save_file()
        {
            // Failure is already on the status line.
            let _ = self.state.export_to(&dest, format);
        }
    }
}

impl eframe::App for LeadDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Theme / font size ----
        let wanted = (self.state.store.theme(), self.state.font_size);
        if self.applied_style != Some(wanted) {
            ui::theme::apply(ctx, wanted.0, wanted.1);
            self.applied_style = Some(wanted);
        }

        // ---- Poll import progress ----
        let messages = self.import_manager.poll_progress();
        let had_messages = !messages.is_empty();
        for msg in messages {
            self.state.handle_import_progress(msg);
        }
        if !self.import_manager.is_busy() {
            self.state.import_in_progress = false;
        }
        if had_messages || self.import_manager.is_busy() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }

        // Keep repainting while a "copied" highlight is on screen so it fades
        // out on time even without input.
        if self.state.copy_feedback_active() {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }

        // ---- Files dropped onto the window ----
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        if let Some(first) = dropped.first() {
            if dropped.len() > 1 {
                tracing::info!(count = dropped.len(), "Several files dropped; importing the first");
            }
            self.state.pending_import = Some(first.clone());
        }

        // ---- Handle flags set by panels ----
        if let Some(path) = self.state.pending_import.take() {
            self.start_import(path);
        }
        if let Some(format) = self.state.pending_export.take() {
            self.run_export(format);
        }

        // Header
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(4.0);
            ui::panels::header::render(ui, &mut self.state);
            ui.add_space(4.0);
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.state.import_in_progress {
                    ui.add(egui::Spinner::new().size(12.0));
                }
                ui.label(&self.state.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let total = self.state.store.leads().len();
                    let filtered = self.state.store.filtered_len();
                    if total > 0 {
                        ui.label(format!("{filtered}/{total} leads"));
                    }
                });
            });
        });

        // Central area
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.store.leads().is_empty() {
                ui::panels::upload::render_welcome(ui, &mut self.state);
                return;
            }

            egui::ScrollArea::vertical()
                .id_salt("main_scroll")
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    ui::panels::dashboard::render(ui, &self.state);
                    ui.add_space(12.0);

                    ui.heading("Lead Management");
                    ui.label(
                        egui::RichText::new(
                            "Click a status badge to change disposition, edit leads inline, \
                             or export your data.",
                        )
                        .weak(),
                    );
                    ui.add_space(6.0);
                    ui::panels::leads_table::render(ui, &mut self.state);

                    ui.add_space(16.0);
                    ui::panels::upload::render_add_more(ui, &mut self.state);
                });
        });

        // Windows
        ui::panels::dialogs::render(ctx, &mut self.state);
        ui::panels::about::render(ctx, &mut self.state);
    }
}
