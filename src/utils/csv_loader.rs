/// CSV input for the import pipelines.
/// The header row names the columns; every later line becomes one `Row`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use serde_json::Value;

use crate::error::Result;
use crate::models::Row;

/// Read a header-first CSV table into rows.
///
/// Cells and headers are trimmed and fully blank lines skipped. A short line
/// only carries the columns it actually has; extra trailing cells are dropped.
pub fn load_rows<R: Read>(reader: R) -> Result<Vec<Row>> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();

    let mut rows: Vec<Row> = Vec::new();
    let mut empty_rows_skipped = 0;

    for (idx, record) in reader.records().enumerate() {
        let record = record?;

        if record.iter().all(|cell| cell.is_empty()) {
            empty_rows_skipped += 1;
            continue;
        }

        if record.len() != headers.len() {
            tracing::warn!(
                "CSV line {} has {} columns, expected {}",
                idx + 2, // +2 for the header and 0-indexing
                record.len(),
                headers.len()
            );
        }

        rows.push(
            headers
                .iter()
                .zip(record.iter())
                .map(|(header, cell)| (header.clone(), Value::String(cell.to_string())))
                .collect(),
        );
    }

    tracing::info!(
        "Loaded CSV: {} rows, {} columns, {} empty rows skipped",
        rows.len(),
        headers.len(),
        empty_rows_skipped
    );

    Ok(rows)
}

pub fn load_rows_from_path(path: impl AsRef<Path>) -> Result<Vec<Row>> {
    let file = File::open(path.as_ref())?;
    load_rows(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_loads_rows_in_column_order() {
        let data = "prod,whse,stndcost\nA1,100P,10.00\nA2,,20.00\n";
        let rows = load_rows(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        let names: Vec<&str> = rows[0].iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["prod", "whse", "stndcost"]);
        assert_eq!(rows[1].text("whse").as_deref(), Some(""));
        assert_eq!(rows[1].text("stndcost").as_deref(), Some("20.00"));
    }

    #[test]
    fn test_trims_and_skips_blank_lines() {
        let data = " prod , stndcost \n A1 , 10.00 \n , \n";
        let rows = load_rows(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text("prod").as_deref(), Some("A1"));
        assert_eq!(rows[0].text("stndcost").as_deref(), Some("10.00"));
    }

    #[test]
    fn test_short_line_carries_present_columns_only() {
        let data = "prod,whse,stndcost\nA1,100P\n";
        let rows = load_rows(data.as_bytes()).unwrap();
        assert_eq!(rows[0].len(), 2);
        assert!(!rows[0].contains("stndcost"));
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "custno,shipto,slsrepout").unwrap();
        writeln!(file, "1001,,SR1").unwrap();

        let rows = load_rows_from_path(file.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text("custno").as_deref(), Some("1001"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_rows_from_path("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, crate::error::SxApiError::IoError(_)));
    }
}
