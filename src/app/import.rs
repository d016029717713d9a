// LeadDesk - app/import.rs
//
// Import lifecycle management. Reads and parses a lead file on a background
// thread and hands the result to the UI thread via an mpsc channel.
//
// Architecture:
//   - `ImportManager` lives on the UI thread; `run_import` runs on a worker.
//   - The UI polls `poll_progress()` once per frame and applies a completed
//     batch to the lead store synchronously, so the store itself is only
//     ever touched from the UI thread.
//   - Only one import runs at a time. A request made while one is in flight
//     is rejected; nothing is queued or merged.
//   - There is no mid-parse cancellation.

use crate::core::import::{self, ImportOutcome};
use crate::util::error::ImportError;
use std::path::PathBuf;
use std::sync::mpsc;

/// Messages sent from the import worker to the UI thread.
#[derive(Debug)]
pub enum ImportProgress {
    Started { path: PathBuf },
    Completed { path: PathBuf, outcome: ImportOutcome },
    Failed { path: PathBuf, error: ImportError },
}

/// Returned by `start_import` when an import is already running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBusy {
    /// File currently being imported.
    pub in_flight: PathBuf,
}

impl std::fmt::Display for ImportBusy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "an import of '{}' is still running",
            self.in_flight.display()
        )
    }
}

/// Manages at most one import on a background thread.
#[derive(Debug, Default)]
pub struct ImportManager {
    progress_rx: Option<mpsc::Receiver<ImportProgress>>,

    /// Path of the running import, cleared when its final message arrives.
    in_flight: Option<PathBuf>,
}

impl ImportManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Start importing `path` on a worker thread.
    pub fn start_import(&mut self, path: PathBuf) -> Result<(), ImportBusy> {
        if let Some(current) = &self.in_flight {
            tracing::warn!(
                requested = %path.display(),
                in_flight = %current.display(),
                "Import rejected: another import is running"
            );
            return Err(ImportBusy {
                in_flight: current.clone(),
            });
        }

        let (tx, rx) = mpsc::channel();
        self.progress_rx = Some(rx);
        self.in_flight = Some(path.clone());

        tracing::info!(file = %path.display(), "Import started");
        std::thread::spawn(move || run_import(path, tx));
        Ok(())
    }

    /// Poll for progress messages without blocking. Returns all pending
    /// messages and releases the busy flag once the final one is seen.
    pub fn poll_progress(&mut self) -> Vec<ImportProgress> {
        let mut messages = Vec::new();
        let mut disconnected = false;
        if let Some(ref rx) = self.progress_rx {
            loop {
                match rx.try_recv() {
                    Ok(msg) => messages.push(msg),
                    Err(mpsc::TryRecvError::Empty) => break,
                    Err(mpsc::TryRecvError::Disconnected) => {
                        disconnected = true;
                        break;
                    }
                }
            }
        }

        let finished = messages.iter().any(is_final);
        if disconnected && !finished {
            // Worker gone without a final message (it panicked).
            tracing::warn!("Import worker exited without a result");
        }
        if finished || disconnected {
            self.progress_rx = None;
            self.in_flight = None;
        }
        messages
    }
}

fn is_final(msg: &ImportProgress) -> bool {
    !matches!(msg, ImportProgress::Started { .. })
}

/// Worker body: parse `path` and report the outcome.
fn run_import(path: PathBuf, tx: mpsc::Sender<ImportProgress>) {
    // A send only fails when the manager was dropped; nothing left to do then.
    let _ = tx.send(ImportProgress::Started { path: path.clone() });

    let msg = match import::import_file(&path) {
        Ok(outcome) => ImportProgress::Completed { path, outcome },
        Err(error) => {
            tracing::warn!(error = %error, "Import failed");
            ImportProgress::Failed { path, error }
        }
    };
    let _ = tx.send(msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    /// Poll until a final message arrives or the deadline passes.
    fn wait_for_result(manager: &mut ImportManager) -> Vec<ImportProgress> {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut all = Vec::new();
        while Instant::now() < deadline {
            all.extend(manager.poll_progress());
            if all.iter().any(is_final) {
                return all;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("import did not finish in time");
    }

    #[test]
    fn test_import_completes_and_releases_busy_flag() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("leads.csv");
        std::fs::write(
            &path,
            "Executive First Name,Phone Number Combined\nAlice,5551234567\nBob,15557654321\n",
        )
        .unwrap();

        let mut manager = ImportManager::new();
        manager.start_import(path.clone()).unwrap();
        assert!(manager.is_busy());

        let messages = wait_for_result(&mut manager);
        assert!(!manager.is_busy());
        match messages.last().unwrap() {
            ImportProgress::Completed { path: p, outcome } => {
                assert_eq!(p, &path);
                assert_eq!(outcome.leads.len(), 2);
                assert_eq!(outcome.leads[1].phone_number, "+15557654321");
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_import_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("leads.pdf");
        std::fs::write(&path, b"%PDF").unwrap();

        let mut manager = ImportManager::new();
        manager.start_import(path).unwrap();
        let messages = wait_for_result(&mut manager);
        assert!(matches!(
            messages.last().unwrap(),
            ImportProgress::Failed {
                error: ImportError::UnsupportedFormat { .. },
                ..
            }
        ));
        assert!(!manager.is_busy());
    }

    #[test]
    fn test_second_import_while_busy_is_rejected() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("a.csv");
        std::fs::write(&first, "phone_number\n5551234567\n").unwrap();

        let mut manager = ImportManager::new();
        manager.start_import(first.clone()).unwrap();
        let err = manager
            .start_import(dir.path().join("b.csv"))
            .unwrap_err();
        assert_eq!(err.in_flight, first);

        wait_for_result(&mut manager);
        assert!(manager.start_import(first).is_ok());
    }
}
