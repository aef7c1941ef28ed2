//! Result-table ingestion.
//!
//! The persistence layer supplies a result set as an ordered list of rows of
//! strings where row 0 is the header. [`ResultTable::from_rows`] accepts that
//! contract directly; [`read_csv_table`] reads the same shape from a CSV
//! export of the `Mitglieder` table.

use std::path::Path;

use csv::ReaderBuilder;

use crate::error::Result;

#[derive(Debug, Clone)]
pub struct ResultTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResultTable {
    /// Build a table from raw rows, treating row 0 as the header.
    ///
    /// Data rows are padded or truncated to the header width so that column
    /// indices resolved against the header stay valid for every row.
    pub fn from_rows(raw_rows: Vec<Vec<String>>) -> Self {
        let mut raw_rows = raw_rows.into_iter();
        let headers: Vec<String> = raw_rows
            .next()
            .unwrap_or_default()
            .iter()
            .map(|value| normalize_header(value))
            .collect();
        let rows = raw_rows
            .map(|record| {
                (0..headers.len())
                    .map(|idx| normalize_cell(record.get(idx).map(String::as_str).unwrap_or("")))
                    .collect()
            })
            .collect();
        ResultTable { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// True for the null-equivalents a database export may contain.
pub fn is_null_cell(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") || trimmed == "\\N"
}

/// Read a result-table export from a CSV file.
pub fn read_csv_table(path: &Path) -> Result<ResultTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Vec<String> = record.iter().map(|value| value.to_string()).collect();
        if row.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        raw_rows.push(row);
    }
    Ok(ResultTable::from_rows(raw_rows))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_from_rows_splits_header_and_data() {
        let table = ResultTable::from_rows(rows(&[&["A", "B"], &["1", "2"], &["3", "4"]]));
        assert_eq!(table.headers, vec!["A", "B"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["1", "2"]);
    }

    #[test]
    fn test_from_rows_pads_short_rows_to_header_width() {
        let table = ResultTable::from_rows(rows(&[&["A", "B", "C"], &["1"]]));
        assert_eq!(table.rows[0], vec!["1", "", ""]);
    }

    #[test]
    fn test_header_normalization_strips_bom_and_collapses_whitespace() {
        let table = ResultTable::from_rows(rows(&[&["\u{feff} Mitglieds  nummer "]]));
        assert_eq!(table.headers, vec!["Mitglieds nummer"]);
    }

    #[test]
    fn test_is_null_cell() {
        assert!(is_null_cell(""));
        assert!(is_null_cell("  "));
        assert!(is_null_cell("NULL"));
        assert!(is_null_cell("null"));
        assert!(is_null_cell("\\N"));
        assert!(!is_null_cell("0"));
    }

    #[test]
    fn test_read_csv_table_skips_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "A,B").expect("write header");
        writeln!(file).expect("write blank");
        writeln!(file, "1,2").expect("write row");
        let table = read_csv_table(file.path()).expect("read table");
        assert_eq!(table.headers, vec!["A", "B"]);
        assert_eq!(table.rows, vec![vec!["1".to_string(), "2".to_string()]]);
    }
}
