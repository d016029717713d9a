// LeadDesk - app/persistence.rs
//
// Snapshot persistence: the lead collection and the theme preference are
// saved after every mutation that touches them and restored at startup.
// Search text, status filter, sort and page are never persisted.
//
// Design principles:
// - The store talks to persistence only through the `SnapshotStore` trait,
//   injected at construction time.
// - Saving is fire-and-forget: failures are logged at WARN and dropped.
// - The JSON file is written atomically (write temp, rename final) so a crash
//   during save never corrupts the previous good snapshot.
// - Load errors are silently discarded: a missing or malformed snapshot
//   starts the app with an empty collection and the light theme.

use crate::core::model::{Lead, Theme};
use crate::util::constants::SNAPSHOT_FILE_NAME;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

// =============================================================================
// On-disk data structure
// =============================================================================

/// Persisted state: `{ "leads": [...], "theme": "light" | "dark" }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub leads: Vec<Lead>,

    #[serde(default)]
    pub theme: Theme,
}

/// Persistence boundary used by the lead store.
pub trait SnapshotStore {
    /// Restore the last saved snapshot. `None` means "start fresh".
    fn load(&self) -> Option<Snapshot>;

    /// Persist `snapshot`. Never fails from the caller's point of view.
    fn save(&self, snapshot: &Snapshot);
}

// =============================================================================
// JSON file store
// =============================================================================

/// Snapshot kept as a single JSON document in the platform data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store located at the standard file name inside `data_dir`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(snapshot_path(data_dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Option<Snapshot> {
        load(&self.path)
    }

    fn save(&self, snapshot: &Snapshot) {
        if let Err(e) = save(snapshot, &self.path) {
            tracing::warn!(error = %e, "Snapshot save failed; changes kept in memory only");
        }
    }
}

/// Resolve the snapshot file path from the platform data directory.
pub fn snapshot_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SNAPSHOT_FILE_NAME)
}

/// Save `snapshot` to `path` atomically (write temp → rename).
///
/// Creates all parent directories as needed. Returns a descriptive error
/// string suitable for a tracing warn! call.
pub fn save(snapshot: &Snapshot, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            format!(
                "cannot create snapshot directory '{}': {e}",
                parent.display()
            )
        })?;
    }

    let json = serde_json::to_string_pretty(snapshot)
        .map_err(|e| format!("failed to serialise snapshot: {e}"))?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json.as_bytes())
        .map_err(|e| format!("failed to write snapshot temp file '{}': {e}", tmp.display()))?;

    std::fs::rename(&tmp, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        format!("failed to finalise snapshot file '{}': {e}", path.display())
    })?;

    tracing::debug!(path = %path.display(), leads = snapshot.leads.len(), "Snapshot saved");
    Ok(())
}

/// Load a `Snapshot` from `path`.
///
/// Returns `None` on any error (file not found, unreadable, malformed JSON,
/// a lead with an unknown disposition).
pub fn load(path: &Path) -> Option<Snapshot> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| {
            // "file not found" is the normal first run.
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!(path = %path.display(), error = %e, "Cannot read snapshot file");
            }
        })
        .ok()?;

    let snapshot: Snapshot = serde_json::from_str(&content)
        .map_err(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Snapshot file is malformed; starting fresh"
            );
        })
        .ok()?;

    tracing::info!(
        path = %path.display(),
        leads = snapshot.leads.len(),
        "Snapshot loaded"
    );
    Some(snapshot)
}

// =============================================================================
// In-memory store
// =============================================================================

/// Snapshot held in process memory. Clones share the same slot, so a test
/// can keep one handle and inspect what the store saved through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<Snapshot>>>,
    saves: Rc<RefCell<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `snapshot`, as if saved by a previous session.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        let store = Self::default();
        *store.slot.borrow_mut() = Some(snapshot);
        store
    }

    /// Most recently saved snapshot.
    pub fn current(&self) -> Option<Snapshot> {
        self.slot.borrow().clone()
    }

    /// Number of `save` calls so far.
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Option<Snapshot> {
        self.current()
    }

    fn save(&self, snapshot: &Snapshot) {
        *self.slot.borrow_mut() = Some(snapshot.clone());
        *self.saves.borrow_mut() += 1;
    }
}

// =============================================================================
// Unit tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Disposition;
    use chrono::Utc;
    use tempfile::TempDir;

    fn sample_snapshot() -> Snapshot {
        let mut lead = Lead::new(Utc::now());
        lead.executive_first_name = "Alice".to_string();
        lead.disposition = Disposition::Interested;
        lead.notes = "follow up".to_string();
        Snapshot {
            leads: vec![lead],
            theme: Theme::Dark,
        }
    }

    /// Save and load must round-trip all fields accurately.
    #[test]
    fn test_snapshot_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("leads-storage.json");
        let original = sample_snapshot();

        save(&original, &path).expect("save should succeed");
        let loaded = load(&path).expect("load should return Some after valid save");
        assert_eq!(loaded, original);
    }

    /// The persisted layout is exactly `{ leads, theme }`.
    #[test]
    fn test_snapshot_layout() {
        let json = serde_json::to_value(sample_snapshot()).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&"leads".to_string()));
        assert_eq!(json["theme"], "dark");
        assert_eq!(json["leads"][0]["disposition"], "interested");
    }

    #[test]
    fn test_snapshot_load_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        assert!(load(&dir.path().join("nonexistent.json")).is_none());
    }

    #[test]
    fn test_snapshot_load_malformed_json_returns_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("leads-storage.json");
        std::fs::write(&path, b"not valid json {{{{").unwrap();
        assert!(load(&path).is_none());
    }

    #[test]
    fn test_snapshot_with_unknown_disposition_returns_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("leads-storage.json");
        let mut json = serde_json::to_value(sample_snapshot()).unwrap();
        json["leads"][0]["disposition"] = "callback".into();
        std::fs::write(&path, json.to_string()).unwrap();
        assert!(load(&path).is_none());
    }

    #[test]
    fn test_partial_snapshot_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("leads-storage.json");
        std::fs::write(&path, br#"{ "theme": "dark" }"#).unwrap();
        let loaded = load(&path).unwrap();
        assert!(loaded.leads.is_empty());
        assert_eq!(loaded.theme, Theme::Dark);
    }

    /// A leftover temp file from a crashed save must not break the next save.
    #[test]
    fn test_snapshot_save_overwrites_stale_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("leads-storage.json");
        save(&sample_snapshot(), &path).unwrap();
        std::fs::write(path.with_extension("json.tmp"), b"garbage").unwrap();

        let updated = Snapshot::default();
        save(&updated, &path).unwrap();
        assert_eq!(load(&path).unwrap(), updated);
    }

    #[test]
    fn test_json_file_store_save_failure_is_swallowed() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be makes the rename fail.
        let path = dir.path().join("leads-storage.json");
        std::fs::create_dir(&path).unwrap();
        let store = JsonFileStore::new(path);
        store.save(&sample_snapshot());
        assert!(store.load().is_none());
    }

    #[test]
    fn test_memory_store_shares_slot_between_clones() {
        let store = MemoryStore::new();
        let handle = store.clone();
        assert!(handle.current().is_none());
        store.save(&sample_snapshot());
        assert_eq!(handle.save_count(), 1);
        assert_eq!(handle.current().unwrap().theme, Theme::Dark);
    }
}
