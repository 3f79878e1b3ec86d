//! CSV output of export rows.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{ReportError, Result};
use crate::rows::{EXPORT_COLUMNS, ExportRow};

/// Write the header and all rows to `writer`.
pub fn write_rows<W: Write>(writer: W, rows: &[ExportRow]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(EXPORT_COLUMNS)?;
    for row in rows {
        csv_writer.write_record(row.to_record())?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the rows to a CSV file, replacing any existing file.
pub fn write_csv_file(path: &Path, rows: &[ExportRow]) -> Result<()> {
    let file = File::create(path).map_err(|source| ReportError::CreateFile {
        path: path.to_path_buf(),
        source,
    })?;
    write_rows(file, rows)
}
