use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use super::error::DataError;
use super::model::{CellValue, Dataset, Header, Record};

// ---------------------------------------------------------------------------
// File entry-point
// ---------------------------------------------------------------------------

/// Read a `.csv` file into memory.  Any other extension is rejected.
pub fn read_csv_file(path: &Path) -> Result<String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    if ext != "csv" {
        bail!("Unsupported file extension: .{ext} (expected .csv)");
    }

    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

// ---------------------------------------------------------------------------
// Text parser
// ---------------------------------------------------------------------------

/// Parse comma-separated text into a [`Dataset`].
///
/// Layout rules:
/// * the whole text is trimmed, then split on `\n`
/// * the first line is the header, every following line a data row
/// * fields are split on `,`, trimmed, and have every `"` removed
///   (no quoting or escaping, a quoted field cannot contain a comma)
/// * a row whose field count differs from the header is dropped silently
pub fn parse_csv_text(text: &str) -> Result<Dataset, DataError> {
    let lines: Vec<&str> = text.trim().split('\n').collect();
    if lines.len() < 2 {
        return Err(DataError::insufficient_rows());
    }

    let header = Arc::new(Header::new(split_fields(lines[0])));

    let mut records = Vec::with_capacity(lines.len() - 1);
    let mut dropped = 0usize;
    for line in &lines[1..] {
        let values = split_fields(line)
            .iter()
            .map(|field| CellValue::from_token(field))
            .collect();
        match Record::new(header.clone(), values) {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        log::debug!("skipped {dropped} rows whose width differs from the header");
    }

    Ok(Dataset::new(header, records))
}

fn split_fields(line: &str) -> Vec<String> {
    line.split(',')
        .map(|field| field.trim().replace('"', ""))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_parse_simple_csv() {
        let ds = parse_csv_text("a,b\n1,2\n3,4").unwrap();
        assert_eq!(ds.headers(), ["a", "b"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[1].number("b"), Some(4.0));
    }

    #[test]
    fn test_single_data_line_is_enough() {
        let ds = parse_csv_text("a,b\n1,2").unwrap();
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn test_header_only_is_rejected() {
        assert_eq!(
            parse_csv_text("a,b,c\n"),
            Err(DataError::Format("insufficient rows".into()))
        );
        assert!(matches!(parse_csv_text(""), Err(DataError::Format(_))));
        assert!(matches!(parse_csv_text("  \n\n  "), Err(DataError::Format(_))));
    }

    #[test]
    fn test_mismatched_rows_are_dropped() {
        let ds = parse_csv_text("a,b\n1,2,3\n4,5\n6").unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records()[0].number("a"), Some(4.0));
    }

    #[test]
    fn test_header_with_only_bad_rows_parses_empty() {
        let ds = parse_csv_text("a,b\n1,2,3").unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn test_quotes_and_whitespace_are_stripped() {
        let ds = parse_csv_text("\"first\", \"second\" \n \"1\" , 2.5 ").unwrap();
        assert_eq!(ds.headers(), ["first", "second"]);
        assert_eq!(ds.records()[0].number("first"), Some(1.0));
        assert_eq!(ds.records()[0].number("second"), Some(2.5));
    }

    #[test]
    fn test_quoted_comma_splits_field() {
        // "x,y" is two fields once split, so the row is wider than the header.
        let ds = parse_csv_text("name,value\n\"x,y\",1\nz,2").unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(
            ds.records()[0].get("name"),
            Some(&CellValue::Text("z".into()))
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        let ds = parse_csv_text("a,b\r\n1,2\r\n3,4\r\n").unwrap();
        assert_eq!(ds.headers(), ["a", "b"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].number("b"), Some(2.0));
    }

    #[test]
    fn test_empty_fields_are_kept_as_empty() {
        let ds = parse_csv_text("a,b\n1,\n,2").unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].get("b"), Some(&CellValue::Empty));
    }

    #[test]
    fn test_read_csv_file() {
        let mut file = Builder::new().suffix(".CSV").tempfile().unwrap();
        writeln!(file, "a,b\n1,2").unwrap();
        file.flush().unwrap();

        let text = read_csv_file(file.path()).unwrap();
        assert!(text.starts_with("a,b"));
    }

    #[test]
    fn test_read_rejects_other_extensions() {
        let file = Builder::new().suffix(".json").tempfile().unwrap();
        let err = read_csv_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }
}
