// LeadDesk - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LeadDesk operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum LeadDeskError {
    /// Import file could not be read or parsed.
    Import(ImportError),

    /// Export operation failed.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for LeadDeskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Import(e) => write!(f, "Import error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for LeadDeskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Import(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Import errors
// ---------------------------------------------------------------------------

/// Errors raised while turning an uploaded file into lead records.
///
/// Every variant is recoverable: the caller reports it and leaves the lead
/// collection untouched.
#[derive(Debug)]
pub enum ImportError {
    /// The file extension is not a recognised delimited-text or spreadsheet type.
    UnsupportedFormat { path: PathBuf, extension: String },

    /// The file is larger than the import limit.
    FileTooLarge { path: PathBuf, size: u64, max_size: u64 },

    /// Delimited text could not be parsed (bad quoting, invalid UTF-8, ...).
    Csv { path: PathBuf, source: csv::Error },

    /// The spreadsheet workbook could not be opened or read.
    Spreadsheet {
        path: PathBuf,
        source: calamine::Error,
    },

    /// The workbook contains no worksheets.
    NoWorksheet { path: PathBuf },

    /// I/O error reading the import file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat { path, extension } => {
                if extension.is_empty() {
                    write!(
                        f,
                        "'{}' has no file extension; expected a CSV or Excel file",
                        path.display()
                    )
                } else {
                    write!(
                        f,
                        "'{}': unsupported file type '.{extension}'; expected a CSV or Excel file",
                        path.display()
                    )
                }
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "'{}' is {size} bytes, exceeds import maximum of {max_size} bytes",
                path.display()
            ),
            Self::Csv { path, source } => {
                write!(f, "Failed to parse CSV '{}': {source}", path.display())
            }
            Self::Spreadsheet { path, source } => {
                write!(f, "Failed to read workbook '{}': {source}", path.display())
            }
            Self::NoWorksheet { path } => {
                write!(f, "Workbook '{}' contains no worksheets", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "I/O error reading '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Csv { source, .. } => Some(source),
            Self::Spreadsheet { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ImportError> for LeadDeskError {
    fn from(e: ImportError) -> Self {
        Self::Import(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// Spreadsheet workbook generation error.
    Xlsx {
        path: PathBuf,
        source: rust_xlsxwriter::XlsxError,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Xlsx { path, source } => {
                write!(f, "Excel export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Xlsx { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for LeadDeskError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for LeadDeskError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for LeadDesk results.
pub type Result<T> = std::result::Result<T, LeadDeskError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_unsupported_format_message_names_extension() {
        let err = ImportError::UnsupportedFormat {
            path: PathBuf::from("leads.pdf"),
            extension: "pdf".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("leads.pdf"));
        assert!(msg.contains(".pdf"));
    }

    #[test]
    fn test_top_level_error_preserves_source_chain() {
        let io = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: LeadDeskError = ImportError::Io {
            path: PathBuf::from("leads.csv"),
            source: io,
        }
        .into();
        assert!(err.to_string().starts_with("Import error:"));
        let inner = err.source().expect("import error is the source");
        assert!(inner.source().is_some(), "io error must remain in the chain");
    }
}
