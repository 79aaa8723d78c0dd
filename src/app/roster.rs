// HireScope - app/roster.rs
//
// Loads an exported applicant table from disk.
// The decoder is chosen by file extension: .json (array of objects)
// or .csv (header row naming the fields).

use crate::core::model::ApplicantRecord;
use crate::util::constants::{MAX_RECORDS, MAX_ROSTER_FILE_SIZE};
use crate::util::error::LoadError;
use std::io::Read;
use std::path::Path;

/// Supported roster encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterFormat {
    Json,
    Csv,
}

impl RosterFormat {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(RosterFormat::Json),
            "csv" => Some(RosterFormat::Csv),
            _ => None,
        }
    }
}

/// Load every applicant record from `path`.
pub fn load_records(path: &Path) -> Result<Vec<ApplicantRecord>, LoadError> {
    let format = RosterFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let io_err = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let size = std::fs::metadata(path).map_err(io_err)?.len();
    if size > MAX_ROSTER_FILE_SIZE {
        return Err(LoadError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max_size: MAX_ROSTER_FILE_SIZE,
        });
    }

    let file = std::fs::File::open(path).map_err(io_err)?;
    let reader = std::io::BufReader::new(file);

    let records = match format {
        RosterFormat::Json => read_json(reader, path)?,
        RosterFormat::Csv => read_csv(reader, path)?,
    };

    tracing::info!(
        path = %path.display(),
        format = ?format,
        records = records.len(),
        "Roster loaded"
    );
    Ok(records)
}

/// Decode a JSON array of applicant objects.
pub fn read_json<R: Read>(reader: R, path: &Path) -> Result<Vec<ApplicantRecord>, LoadError> {
    let records: Vec<ApplicantRecord> =
        serde_json::from_reader(reader).map_err(|e| LoadError::Json {
            path: path.to_path_buf(),
            source: e,
        })?;

    if records.len() > MAX_RECORDS {
        return Err(LoadError::TooManyRecords {
            path: path.to_path_buf(),
            count: records.len(),
            max: MAX_RECORDS,
        });
    }
    Ok(records)
}

/// Decode CSV rows keyed by the header row. Unknown columns are ignored.
pub fn read_csv<R: Read>(reader: R, path: &Path) -> Result<Vec<ApplicantRecord>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.deserialize::<ApplicantRecord>() {
        let record = row.map_err(|e| LoadError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;
        if records.len() == MAX_RECORDS {
            return Err(LoadError::TooManyRecords {
                path: path.to_path_buf(),
                count: records.len(),
                max: MAX_RECORDS,
            });
        }
        records.push(record);
    }
    Ok(records)
}
