// LeadDesk - core/export.rs
//
// Spreadsheet (xlsx) and CSV export of the full lead collection.
// Always writes insertion order; the current filter/sort never applies.
// Core layer: writes to any Write trait object.

use crate::core::model::Lead;
use crate::util::constants::{EXPORT_FILE_PREFIX, EXPORT_HEADERS, EXPORT_SHEET_NAME};
use crate::util::error::ExportError;
use chrono::NaiveDate;
use rust_xlsxwriter::Workbook;
use std::io::Write;
use std::path::Path;

/// Export file format offered by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }
}

/// Default export file name for `date`, e.g. `leads-export-2024-03-01.xlsx`.
pub fn default_export_file_name(date: NaiveDate, format: ExportFormat) -> String {
    format!(
        "{EXPORT_FILE_PREFIX}-{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// One output row, in `EXPORT_HEADERS` column order.
fn export_row(lead: &Lead) -> [&str; 6] {
    [
        lead.executive_first_name.as_str(),
        lead.company_name.as_str(),
        lead.phone_number.as_str(),
        lead.address.as_str(),
        lead.disposition.as_str(),
        lead.notes.as_str(),
    ]
}

/// Export leads to an xlsx workbook with a single "Leads" sheet.
///
/// All cells are written as strings so phone numbers keep their leading `+`.
/// Returns the number of lead rows written.
pub fn export_xlsx<W: Write>(
    leads: &[Lead],
    mut writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let xlsx_err = |e: rust_xlsxwriter::XlsxError| ExportError::Xlsx {
        path: export_path.to_path_buf(),
        source: e,
    };

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(EXPORT_SHEET_NAME).map_err(xlsx_err)?;

    for (col, header) in EXPORT_HEADERS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(xlsx_err)?;
    }

    for (i, lead) in leads.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, value) in export_row(lead).iter().enumerate() {
            worksheet
                .write_string(row, col as u16, *value)
                .map_err(xlsx_err)?;
        }
    }

    let buffer = workbook.save_to_buffer().map_err(xlsx_err)?;
    writer
        .write_all(&buffer)
        .and_then(|_| writer.flush())
        .map_err(|e| ExportError::Io {
            path: export_path.to_path_buf(),
            source: e,
        })?;

    Ok(leads.len())
}

/// Export leads to CSV with the same columns as the spreadsheet export.
pub fn export_csv<W: Write>(
    leads: &[Lead],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |e: csv::Error| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(EXPORT_HEADERS).map_err(csv_err)?;

    for lead in leads {
        csv_writer.write_record(export_row(lead)).map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(leads.len())
}

/// Create `path` and export `leads` to it in `format`.
pub fn export_to_file(
    leads: &[Lead],
    path: &Path,
    format: ExportFormat,
) -> Result<usize, ExportError> {
    let file = std::fs::File::create(path).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let writer = std::io::BufWriter::new(file);

    let count = match format {
        ExportFormat::Xlsx => export_xlsx(leads, writer, path)?,
        ExportFormat::Csv => export_csv(leads, writer, path)?,
    };

    tracing::info!(
        path = %path.display(),
        leads = count,
        format = format.extension(),
        "Export written"
    );
    Ok(count)
}
