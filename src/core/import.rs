// LeadDesk - core/import.rs
//
// Turns an uploaded tabular file into new lead records.
//
// Pipeline:
//   1. Pick the format from the file extension (delimited text or workbook).
//   2. Parse into header-keyed raw rows (first sheet only for workbooks).
//   3. Resolve each lead field through its recognised header variants.
//   4. Mint a pending lead per row: fresh id, canonical phone, import timestamp.
//
// Any failure is returned as an `ImportError` before a single lead is built,
// so callers never see a partial batch.

use crate::core::model::{Disposition, Lead};
use crate::core::phone::normalize_phone;
use crate::util::constants;
use crate::util::error::ImportError;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

// =============================================================================
// Format detection
// =============================================================================

/// Tabular input format, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    /// Delimited text with a header row.
    Delimited { delimiter: u8 },

    /// Spreadsheet workbook; only the first sheet is read.
    Spreadsheet,
}

impl ImportFormat {
    /// Determine the format of `path` from its extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, ImportError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        if constants::DELIMITED_EXTENSIONS.contains(&extension.as_str()) {
            let delimiter = if extension == "tsv" { b'\t' } else { b',' };
            Ok(ImportFormat::Delimited { delimiter })
        } else if constants::SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
            Ok(ImportFormat::Spreadsheet)
        } else {
            Err(ImportError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            })
        }
    }
}

// =============================================================================
// Raw rows
// =============================================================================

/// One data row keyed by (trimmed) header text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: HashMap<String, String>,
}

impl RawRow {
    /// Build a row from parallel header/value sequences. Extra values beyond
    /// the header count are dropped; the first of duplicate headers wins.
    pub fn from_pairs<'a>(
        headers: impl IntoIterator<Item = &'a str>,
        values: impl IntoIterator<Item = String>,
    ) -> Self {
        let mut cells = HashMap::new();
        for (header, value) in headers.into_iter().zip(values) {
            cells.entry(header.to_string()).or_insert(value);
        }
        Self { cells }
    }

    /// Value of the first header variant that holds a non-empty cell.
    pub fn resolve(&self, variants: &[&str]) -> Option<&str> {
        variants
            .iter()
            .filter_map(|v| self.cells.get(*v))
            .map(String::as_str)
            .find(|value| !value.is_empty())
    }

    /// True when every cell is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.cells.values().all(|v| v.trim().is_empty())
    }
}

/// Result of a successful import.
#[derive(Debug, Clone, Default)]
pub struct ImportOutcome {
    /// Newly minted leads, in file row order.
    pub leads: Vec<Lead>,

    /// Data rows skipped because every cell was blank.
    pub skipped_blank_rows: usize,
}

// =============================================================================
// Entry points
// =============================================================================

/// Read and import `path`, stamping the new leads with the current time.
pub fn import_file(path: &Path) -> Result<ImportOutcome, ImportError> {
    // Resolve the format first so an unsupported file is never read.
    let format = ImportFormat::from_path(path)?;

    let size = std::fs::metadata(path)
        .map_err(|e| ImportError::Io {
            path: path.to_path_buf(),
            source: e,
        })?
        .len();
    if size > constants::MAX_IMPORT_FILE_SIZE {
        return Err(ImportError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max_size: constants::MAX_IMPORT_FILE_SIZE,
        });
    }

    let bytes = std::fs::read(path).map_err(|e| ImportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    import_bytes(path, format, bytes, Utc::now())
}

/// Import already-read file content. `path` is used for error context only.
pub fn import_bytes(
    path: &Path,
    format: ImportFormat,
    bytes: Vec<u8>,
    now: DateTime<Utc>,
) -> Result<ImportOutcome, ImportError> {
    let rows = match format {
        ImportFormat::Delimited { delimiter } => parse_delimited(path, &bytes, delimiter)?,
        ImportFormat::Spreadsheet => parse_spreadsheet(path, bytes)?,
    };

    let total_rows = rows.len();
    let leads: Vec<Lead> = rows
        .iter()
        .filter(|row| !row.is_blank())
        .map(|row| lead_from_row(row, now))
        .collect();
    let skipped_blank_rows = total_rows - leads.len();

    tracing::info!(
        file = %path.display(),
        leads = leads.len(),
        skipped = skipped_blank_rows,
        "Import parsed"
    );

    Ok(ImportOutcome {
        leads,
        skipped_blank_rows,
    })
}

/// Build a new pending lead from a raw row.
///
/// Missing text fields resolve to empty strings. Disposition and notes are
/// read when present (so an exported file re-imports losslessly); an absent
/// or unrecognised disposition falls back to `Pending`.
pub fn lead_from_row(row: &RawRow, now: DateTime<Utc>) -> Lead {
    let text = |variants: &[&str]| row.resolve(variants).unwrap_or_default().to_string();

    let mut lead = Lead::new(now);
    lead.phone_number =
        normalize_phone(row.resolve(constants::PHONE_HEADERS).unwrap_or_default());
    lead.executive_first_name = text(constants::NAME_HEADERS);
    lead.address = text(constants::ADDRESS_HEADERS);
    lead.company_name = text(constants::COMPANY_HEADERS);
    lead.disposition = row
        .resolve(constants::DISPOSITION_HEADERS)
        .and_then(Disposition::parse)
        .unwrap_or_default();
    lead.notes = text(constants::NOTES_HEADERS);
    lead
}

// =============================================================================
// Parsers
// =============================================================================

fn clean_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}

/// Parse delimited text with a required header row.
pub fn parse_delimited(
    path: &Path,
    bytes: &[u8],
    delimiter: u8,
) -> Result<Vec<RawRow>, ImportError> {
    let csv_err = |e: csv::Error| ImportError::Csv {
        path: path.to_path_buf(),
        source: e,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(clean_header)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        rows.push(RawRow::from_pairs(
            headers.iter().map(String::as_str),
            record.iter().map(str::to_string),
        ));
    }

    tracing::debug!(
        file = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        "Delimited text parsed"
    );
    Ok(rows)
}

/// Parse the first worksheet of a workbook; its first row is the header.
pub fn parse_spreadsheet(path: &Path, bytes: Vec<u8>) -> Result<Vec<RawRow>, ImportError> {
    let sheet_err = |e: calamine::Error| ImportError::Spreadsheet {
        path: path.to_path_buf(),
        source: e,
    };

    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(sheet_err)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ImportError::NoWorksheet {
            path: path.to_path_buf(),
        })?
        .map_err(sheet_err)?;

    let mut sheet_rows = range.rows();
    let Some(header_row) = sheet_rows.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| clean_header(&cell_text(cell)))
        .collect();

    let rows: Vec<RawRow> = sheet_rows
        .map(|cells| {
            RawRow::from_pairs(
                headers.iter().map(String::as_str),
                cells.iter().map(cell_text),
            )
        })
        .collect();

    tracing::debug!(
        file = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        "Worksheet parsed"
    );
    Ok(rows)
}

/// Render a worksheet cell as text. Whole floats print without a fractional
/// part, so a phone number stored as a number keeps its digits intact.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
