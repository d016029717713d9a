// LeadDesk - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LeadDesk";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LeadDesk";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Lead table
// =============================================================================

/// Number of leads shown per table page. Fixed; not user-configurable.
pub const PAGE_SIZE: usize = 50;

/// Raw value of the "no disposition filter" sentinel.
pub const ALL_DISPOSITIONS: &str = "all";

// =============================================================================
// Import
// =============================================================================

/// File extensions parsed as delimited text.
pub const DELIMITED_EXTENSIONS: &[&str] = &["csv", "tsv", "txt"];

/// File extensions parsed as spreadsheet workbooks (first sheet only).
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];

/// Upper bound on the size of a file accepted for import.
///
/// The whole file is read into memory before parsing, so this caps the
/// allocation a mistaken pick (a video, a disk image) can cause.
pub const MAX_IMPORT_FILE_SIZE: u64 = 64 * 1024 * 1024; // 64 MB

/// Recognised header variants per lead field, in resolution order.
pub const PHONE_HEADERS: &[&str] = &["Phone Number Combined", "phone_number"];
pub const NAME_HEADERS: &[&str] = &["Executive First Name", "executive_first_name"];
pub const ADDRESS_HEADERS: &[&str] = &["Address", "address"];
pub const COMPANY_HEADERS: &[&str] = &["Company Name", "company_name"];
pub const DISPOSITION_HEADERS: &[&str] = &["Disposition", "disposition"];
pub const NOTES_HEADERS: &[&str] = &["Notes", "notes"];

// =============================================================================
// Export
// =============================================================================

/// Worksheet name used for spreadsheet exports.
pub const EXPORT_SHEET_NAME: &str = "Leads";

/// Column headers written by every exporter, in output order.
pub const EXPORT_HEADERS: [&str; 6] = [
    "Executive First Name",
    "Company Name",
    "Phone Number Combined",
    "Address",
    "Disposition",
    "Notes",
];

/// Prefix of the default export file name (`leads-export-<date>.xlsx`).
pub const EXPORT_FILE_PREFIX: &str = "leads-export";

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

/// How long the "Copied" marker stays next to a phone number after copying.
pub const COPY_FEEDBACK_MS: u64 = 2_000;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Persisted snapshot file name (stored in the platform data directory).
pub const SNAPSHOT_FILE_NAME: &str = "leads-storage.json";
