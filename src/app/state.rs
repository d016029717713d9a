// LeadDesk - app/state.rs
//
// Application state: the lead store plus UI-only state (edit buffer,
// confirmations, status line, clipboard feedback).
// Owned by the eframe::App implementation. Panels mutate it and raise
// request flags; gui.rs acts on the flags once per frame.

use crate::app::import::ImportProgress;
use crate::app::store::LeadStore;
use crate::core::export::{self, ExportFormat};
use crate::core::model::{Disposition, Lead, LeadPatch};
use crate::util::constants::COPY_FEEDBACK_MS;
use crate::util::error;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Editable copy of one lead while its table row is in edit mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadDraft {
    pub id: String,
    pub executive_first_name: String,
    pub company_name: String,
    pub address: String,
    pub notes: String,
}

impl LeadDraft {
    pub fn from_lead(lead: &Lead) -> Self {
        Self {
            id: lead.id.clone(),
            executive_first_name: lead.executive_first_name.clone(),
            company_name: lead.company_name.clone(),
            address: lead.address.clone(),
            notes: lead.notes.clone(),
        }
    }

    pub fn to_patch(&self) -> LeadPatch {
        LeadPatch {
            executive_first_name: Some(self.executive_first_name.clone()),
            company_name: Some(self.company_name.clone()),
            address: Some(self.address.clone()),
            notes: Some(self.notes.clone()),
            ..Default::default()
        }
    }
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    pub store: LeadStore,

    /// Status message for the status bar.
    pub status_message: String,

    /// Whether an import is currently running.
    pub import_in_progress: bool,

    /// File a panel asked to import; consumed by gui.rs.
    pub pending_import: Option<PathBuf>,

    /// Export a panel asked for; consumed by gui.rs (it owns the file dialog).
    pub pending_export: Option<ExportFormat>,

    /// Blocking notice shown after a failed import.
    pub import_error: Option<String>,

    /// Row currently in inline edit mode.
    pub editing: Option<LeadDraft>,

    /// Lead id awaiting delete confirmation.
    pub pending_delete: Option<String>,

    /// Whether the clear-all confirmation window is open.
    pub show_clear_confirm: bool,

    /// Whether the About window is open.
    pub show_about: bool,

    /// Lead whose phone was just copied, with the copy time.
    copied: Option<(String, Instant)>,

    /// Body font size in points (from config).
    pub font_size: f32,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,
}

impl AppState {
    pub fn new(store: LeadStore, font_size: f32, debug_mode: bool) -> Self {
        let status_message = if store.leads().is_empty() {
            "Ready. Import a CSV or Excel file to begin.".to_string()
        } else {
            format!("Restored {} leads.", store.leads().len())
        };
        Self {
            store,
            status_message,
            import_in_progress: false,
            pending_import: None,
            pending_export: None,
            import_error: None,
            editing: None,
            pending_delete: None,
            show_clear_confirm: false,
            show_about: false,
            copied: None,
            font_size,
            debug_mode,
        }
    }

    // -------------------------------------------------------------------------
    // Import
    // -------------------------------------------------------------------------

    /// Apply one message from the import worker.
    pub fn handle_import_progress(&mut self, msg: ImportProgress) {
        match msg {
            ImportProgress::Started { path } => {
                self.import_in_progress = true;
                self.status_message = format!("Importing {}...", file_label(&path));
            }
            ImportProgress::Completed { path, outcome } => {
                self.import_in_progress = false;
                let count = outcome.leads.len();
                self.store.add_leads(outcome.leads);
                self.status_message = if outcome.skipped_blank_rows > 0 {
                    format!(
                        "Imported {count} leads from {} ({} blank rows skipped).",
                        file_label(&path),
                        outcome.skipped_blank_rows
                    )
                } else {
                    format!("Imported {count} leads from {}.", file_label(&path))
                };
            }
            ImportProgress::Failed { path, error } => {
                self.import_in_progress = false;
                self.status_message = format!("Import of {} failed.", file_label(&path));
                self.import_error = Some(format!(
                    "Error processing file. Please check the format.\n\n{error}"
                ));
            }
        }
    }

    // -------------------------------------------------------------------------
    // Export
    // -------------------------------------------------------------------------

    /// Export the whole collection to `dest` and report on the status line.
    pub fn export_to(&mut self, dest: &Path, format: ExportFormat) -> error::Result<usize> {
        let result = export::export_to_file(self.store.leads(), dest, format);
        match result {
            Ok(n) => {
                self.status_message = format!("Exported {n} leads to {}.", file_label(dest));
                Ok(n)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Export failed");
                self.status_message = format!("Export failed: {e}");
                Err(e.into())
            }
        }
    }

    // -------------------------------------------------------------------------
    // Row actions
    // -------------------------------------------------------------------------

    pub fn begin_edit(&mut self, id: &str) {
        self.editing = self.store.find(id).map(LeadDraft::from_lead);
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Commit the edit buffer to the store and leave edit mode.
    pub fn save_edit(&mut self) {
        if let Some(draft) = self.editing.take() {
            if self.store.update_lead(&draft.id, &draft.to_patch()) {
                self.status_message = "Lead saved.".to_string();
            }
        }
    }

    pub fn set_disposition(&mut self, id: &str, disposition: Disposition) {
        self.store
            .update_lead(id, &LeadPatch::disposition(disposition));
    }

    pub fn request_delete(&mut self, id: &str) {
        self.pending_delete = Some(id.to_string());
    }

    pub fn confirm_delete(&mut self) {
        if let Some(id) = self.pending_delete.take() {
            if self.store.delete_lead(&id) {
                if self.editing.as_ref().is_some_and(|d| d.id == id) {
                    self.editing = None;
                }
                self.status_message = "Lead deleted.".to_string();
            }
        }
    }

    pub fn confirm_clear_all(&mut self) {
        self.show_clear_confirm = false;
        let removed = self.store.leads().len();
        self.store.clear_all_leads();
        self.editing = None;
        self.pending_delete = None;
        self.status_message = format!("Removed {removed} leads.");
    }

    // -------------------------------------------------------------------------
    // Clipboard feedback
    // -------------------------------------------------------------------------

    pub fn mark_copied(&mut self, id: &str) {
        self.copied = Some((id.to_string(), Instant::now()));
        self.status_message = "Phone number copied to clipboard.".to_string();
    }

    /// True while the "copied" highlight for `id` should still show.
    pub fn recently_copied(&self, id: &str) -> bool {
        self.copied.as_ref().is_some_and(|(copied_id, at)| {
            copied_id == id && at.elapsed() < Duration::from_millis(COPY_FEEDBACK_MS)
        })
    }

    /// Whether a copy highlight is still on screen (the UI keeps repainting).
    pub fn copy_feedback_active(&self) -> bool {
        self.copied
            .as_ref()
            .is_some_and(|(_, at)| at.elapsed() < Duration::from_millis(COPY_FEEDBACK_MS))
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
