// HireScope - core/export.rs
//
// Table, CSV and JSON rendering of matching applicant rows.
// Core layer: writes to any Write trait object.

use crate::core::model::{ApplicantRecord, SearchField};
use crate::util::constants::TABLE_MAX_CELL_WIDTH;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Output format for matching rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Table,
    Csv,
    Json,
}

impl ExportFormat {
    /// Parse a format name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "table" => Some(ExportFormat::Table),
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Table => "table",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Write `records` in the chosen format. Returns the number of rows written.
pub fn export<'a, W, I>(
    records: I,
    format: ExportFormat,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a ApplicantRecord>,
{
    match format {
        ExportFormat::Table => export_table(records, writer, export_path),
        ExportFormat::Csv => export_csv(records, writer, export_path),
        ExportFormat::Json => export_json(records, writer, export_path),
    }
}

/// Columns shown in the plain-text table.
const TABLE_COLUMNS: &[SearchField] = &[
    SearchField::FullName,
    SearchField::ApplicationStatus,
    SearchField::Decision,
    SearchField::EducationLevel,
];

/// Cut a cell to the table width, marking the cut with `~`.
fn fit_cell(value: &str) -> String {
    if value.chars().count() <= TABLE_MAX_CELL_WIDTH {
        return value.to_string();
    }
    let mut cut: String = value.chars().take(TABLE_MAX_CELL_WIDTH - 1).collect();
    cut.push('~');
    cut
}

/// Export rows as a fixed-width text table (id, name, status, decision,
/// education).
pub fn export_table<'a, W, I>(
    records: I,
    mut writer: W,
    export_path: &Path,
) -> Result<usize, ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a ApplicantRecord>,
{
    let mut header = vec!["Id".to_string()];
    header.extend(TABLE_COLUMNS.iter().map(|f| f.label().to_string()));

    let rows: Vec<Vec<String>> = records
        .into_iter()
        .map(|record| {
            let mut row = vec![fit_cell(record.id.as_deref().unwrap_or("-"))];
            row.extend(
                TABLE_COLUMNS
                    .iter()
                    .map(|f| fit_cell(record.field(*f).unwrap_or("-"))),
            );
            row
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let io_err = |source| ExportError::Io {
        path: export_path.to_path_buf(),
        source,
    };

    for line in std::iter::once(&header).chain(rows.iter()) {
        let cells: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        writeln!(writer, "{}", cells.join("  ").trim_end()).map_err(io_err)?;
    }
    writer.flush().map_err(io_err)?;

    Ok(rows.len())
}

/// Export rows to CSV: `id` followed by every searchable field.
pub fn export_csv<'a, W, I>(
    records: I,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a ApplicantRecord>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    let csv_err = |source| ExportError::Csv {
        path: export_path.to_path_buf(),
        source,
    };

    let mut header = vec!["id"];
    header.extend(SearchField::all().iter().map(|f| f.key()));
    csv_writer.write_record(&header).map_err(csv_err)?;

    let mut count = 0;
    for record in records {
        let mut row = vec![record.id.as_deref().unwrap_or("")];
        row.extend(
            SearchField::all()
                .iter()
                .map(|f| record.field(*f).unwrap_or("")),
        );
        csv_writer.write_record(&row).map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export rows to JSON (array of objects).
pub fn export_json<'a, W, I>(
    records: I,
    mut writer: W,
    export_path: &Path,
) -> Result<usize, ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a ApplicantRecord>,
{
    let rows: Vec<&ApplicantRecord> = records.into_iter().collect();
    serde_json::to_writer_pretty(&mut writer, &rows).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(rows.len())
}
