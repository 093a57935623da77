//! Tabular ingest: uploaded file bytes in, flat sequences of cell text out.
//!
//! Both readers produce raw (non-formatted) scalars. Numeric cells are stringified
//! without scientific notation so digit strings survive intact, and date cells keep
//! their date value until they are stringified at this boundary.

use std::io::Cursor;
use std::path::Path;

use calamine::{Data, ExcelDateTime, Reader, open_workbook_auto_from_rs};
use csv::ReaderBuilder;
use tracing::debug;

use crate::config::DelimiterChoice;
use crate::constants::ingest::{
    DELIMITER_CANDIDATES, HEADER_HINTS, SNIFF_SAMPLE_BYTES, SNIFF_SAMPLE_LINES,
};
use crate::errors::SiftError;
use crate::types::RawCell;

/// Upload kind, dispatched from the declared file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    /// Delimited text (`.csv`).
    Csv,
    /// Excel workbook (`.xlsx` or `.xls`).
    Workbook,
}

impl FileKind {
    /// Dispatch on the declared file name's extension.
    pub fn from_name(file_name: &str) -> Result<Self, SiftError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("csv") => Ok(FileKind::Csv),
            Some("xlsx") | Some("xls") => Ok(FileKind::Workbook),
            _ => Err(SiftError::UnsupportedFileType {
                file_name: file_name.to_string(),
            }),
        }
    }
}

/// Extract the first-column values of an upload: trimmed, empties dropped, and a
/// detected header row removed.
///
/// Header detection is a heuristic: the first value is dropped when it is empty or
/// when its lowercase form contains one of the usual label substrings (`phone`,
/// `number`, `ticket`, `id`). A genuine number containing a hint substring would be
/// misclassified and a nonstandard label slips through; this is a known limitation
/// kept for parity with how uploads are labeled in practice.
pub fn ingest_values(
    bytes: &[u8],
    kind: FileKind,
    delimiter: DelimiterChoice,
) -> Result<Vec<RawCell>, SiftError> {
    let mut values = match kind {
        FileKind::Csv => delimited_first_column(bytes, delimiter)?,
        FileKind::Workbook => workbook_first_column(bytes)?,
    };
    if drops_header(&values) {
        debug!("[numsift:ingest] dropping header row '{}'", values[0]);
        values.remove(0);
    }
    debug!("[numsift:ingest] extracted {} values", values.len());
    Ok(values)
}

/// Extract the text of every non-empty cell in every row, untrimmed beyond edge
/// whitespace and with no header handling. Used by the free-text phone scan, which
/// looks inside cells rather than treating each one as a whole value.
pub fn ingest_cell_texts(
    bytes: &[u8],
    kind: FileKind,
    delimiter: DelimiterChoice,
) -> Result<Vec<String>, SiftError> {
    match kind {
        FileKind::Csv => delimited_cells(bytes, delimiter),
        FileKind::Workbook => workbook_cells(bytes),
    }
}

fn drops_header(values: &[RawCell]) -> bool {
    let Some(first) = values.first() else {
        return false;
    };
    if first.is_empty() {
        return true;
    }
    let lower = first.to_lowercase();
    HEADER_HINTS.iter().any(|hint| lower.contains(hint))
}

fn resolve_delimiter(bytes: &[u8], delimiter: DelimiterChoice) -> Result<u8, SiftError> {
    match delimiter.as_byte() {
        Some(byte) => Ok(byte),
        None => sniff_delimiter(bytes),
    }
}

/// Score each candidate delimiter over a bounded sample of lines. A candidate wins
/// when every sampled line splits into the same field count greater than one; a file
/// with no delimited structure at all falls back to comma and parses as a single
/// column. Candidates that appear but never agree on a field count are the
/// unrecognizable case surfaced to the caller.
fn sniff_delimiter(bytes: &[u8]) -> Result<u8, SiftError> {
    let truncated = bytes.len() > SNIFF_SAMPLE_BYTES;
    let text = String::from_utf8_lossy(&bytes[..bytes.len().min(SNIFF_SAMPLE_BYTES)]);
    let mut lines: Vec<&str> = text.lines().collect();
    if truncated {
        // The prefix cut may have split the last line mid-field.
        lines.pop();
    }
    let sample: Vec<&str> = lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .take(SNIFF_SAMPLE_LINES)
        .collect();
    if sample.is_empty() {
        return Ok(b',');
    }

    let mut best: Option<(u8, usize)> = None;
    let mut saw_inconsistent = false;
    for &candidate in &DELIMITER_CANDIDATES {
        let separator = candidate as char;
        let mut counts = sample.iter().map(|line| line.split(separator).count());
        let first = counts.next().unwrap_or(1);
        let uniform = counts.all(|count| count == first);
        if first > 1 && uniform {
            if best.is_none_or(|(_, fields)| first > fields) {
                best = Some((candidate, first));
            }
        } else if !uniform || first > 1 {
            saw_inconsistent = true;
        }
    }

    match best {
        Some((delimiter, fields)) => {
            debug!(
                "[numsift:ingest] sniffed delimiter {:?} ({} fields)",
                delimiter as char, fields
            );
            Ok(delimiter)
        }
        None if saw_inconsistent => Err(SiftError::UnrecognizedDelimiter),
        None => Ok(b','),
    }
}

fn delimited_first_column(
    bytes: &[u8],
    delimiter: DelimiterChoice,
) -> Result<Vec<RawCell>, SiftError> {
    let delimiter = resolve_delimiter(bytes, delimiter)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(bytes);

    let mut values = Vec::new();
    for record in reader.byte_records() {
        let record = record.map_err(|err| SiftError::Parse(err.to_string()))?;
        let Some(field) = record.get(0) else {
            continue;
        };
        let text = String::from_utf8_lossy(field);
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            values.push(trimmed.to_string());
        }
    }
    Ok(values)
}

fn delimited_cells(bytes: &[u8], delimiter: DelimiterChoice) -> Result<Vec<String>, SiftError> {
    let delimiter = resolve_delimiter(bytes, delimiter)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(bytes);

    let mut cells = Vec::new();
    for record in reader.byte_records() {
        let record = record.map_err(|err| SiftError::Parse(err.to_string()))?;
        for field in record.iter() {
            let text = String::from_utf8_lossy(field);
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                cells.push(trimmed.to_string());
            }
        }
    }
    Ok(cells)
}

fn workbook_first_column(bytes: &[u8]) -> Result<Vec<RawCell>, SiftError> {
    let range = first_sheet_range(bytes)?;
    let mut values = Vec::new();
    for row in range.rows() {
        let Some(cell) = row.first() else {
            continue;
        };
        if let Some(text) = cell_text(cell) {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                values.push(trimmed.to_string());
            }
        }
    }
    Ok(values)
}

fn workbook_cells(bytes: &[u8]) -> Result<Vec<String>, SiftError> {
    let range = first_sheet_range(bytes)?;
    let mut cells = Vec::new();
    for row in range.rows() {
        for cell in row {
            if let Some(text) = cell_text(cell) {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    cells.push(trimmed.to_string());
                }
            }
        }
    }
    Ok(cells)
}

fn first_sheet_range(bytes: &[u8]) -> Result<calamine::Range<Data>, SiftError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|err| SiftError::Parse(err.to_string()))?;
    if workbook.sheet_names().is_empty() {
        return Err(SiftError::EmptyWorkbook);
    }
    match workbook.worksheet_range_at(0) {
        Some(Ok(range)) => Ok(range),
        Some(Err(_)) | None => Err(SiftError::NoWorksheet),
    }
}

/// Raw scalar text of a cell; `None` for empties and cell errors.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(value) => Some(value.clone()),
        Data::Bool(value) => Some(value.to_string()),
        Data::Int(value) => Some(value.to_string()),
        Data::Float(value) => Some(float_text(*value)),
        Data::DateTime(value) => Some(datetime_text(value)),
        Data::DateTimeIso(value) | Data::DurationIso(value) => Some(value.clone()),
    }
}

/// Integral floats print as plain integers so stored numbers like `911223344.0`
/// come back as `911223344`; scientific notation is never produced.
fn float_text(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn datetime_text(value: &ExcelDateTime) -> String {
    match value.as_datetime() {
        Some(datetime) => datetime.format("%Y-%m-%dT%H:%M:%S").to_string(),
        None => value.as_f64().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_kind_dispatches_on_extension() {
        assert_eq!(FileKind::from_name("list.csv").unwrap(), FileKind::Csv);
        assert_eq!(FileKind::from_name("LIST.XLSX").unwrap(), FileKind::Workbook);
        assert_eq!(FileKind::from_name("old.xls").unwrap(), FileKind::Workbook);
        assert!(matches!(
            FileKind::from_name("notes.txt"),
            Err(SiftError::UnsupportedFileType { .. })
        ));
        assert!(matches!(
            FileKind::from_name("no_extension"),
            Err(SiftError::UnsupportedFileType { .. })
        ));
    }

    #[test]
    fn header_row_is_dropped_by_hint() {
        let bytes = b"Phone\n0911223344\n0922334455\n";
        let values = ingest_values(bytes, FileKind::Csv, DelimiterChoice::Auto).unwrap();
        assert_eq!(values, vec!["0911223344", "0922334455"]);
    }

    #[test]
    fn non_header_first_row_is_kept() {
        let bytes = b"0911223344\n0922334455\n";
        let values = ingest_values(bytes, FileKind::Csv, DelimiterChoice::Auto).unwrap();
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn ticket_and_id_hints_also_drop() {
        for header in ["Ticket No", "participant id", "NUMBER"] {
            let bytes = format!("{header}\n0911223344\n");
            let values =
                ingest_values(bytes.as_bytes(), FileKind::Csv, DelimiterChoice::Auto).unwrap();
            assert_eq!(values, vec!["0911223344"], "{header}");
        }
    }

    #[test]
    fn first_column_only_and_empties_dropped() {
        let bytes = b"0911223344;x;y\n\n  \n0922334455;z\n";
        let values = ingest_values(bytes, FileKind::Csv, DelimiterChoice::Semicolon).unwrap();
        assert_eq!(values, vec!["0911223344", "0922334455"]);
    }

    #[test]
    fn sniffer_picks_consistent_delimiter() {
        assert_eq!(sniff_delimiter(b"a;b;c\nd;e;f\n").unwrap(), b';');
        assert_eq!(sniff_delimiter(b"a|b\nc|d\n").unwrap(), b'|');
        assert_eq!(sniff_delimiter(b"a\tb\nc\td\n").unwrap(), b'\t');
    }

    #[test]
    fn sniffer_falls_back_to_comma_for_single_column() {
        assert_eq!(sniff_delimiter(b"0911223344\n0922334455\n").unwrap(), b',');
        assert_eq!(sniff_delimiter(b"").unwrap(), b',');
    }

    #[test]
    fn sniffer_rejects_inconsistent_structure() {
        let bytes = b"a;b;c\nd;e\nf\n";
        assert!(matches!(
            sniff_delimiter(bytes),
            Err(SiftError::UnrecognizedDelimiter)
        ));
    }

    #[test]
    fn cell_texts_cover_every_column() {
        let bytes = b"one,two\nthree,four\n";
        let cells = ingest_cell_texts(bytes, FileKind::Csv, DelimiterChoice::Comma).unwrap();
        assert_eq!(cells, vec!["one", "two", "three", "four"]);
    }

    #[test]
    fn float_text_never_uses_scientific_notation() {
        assert_eq!(float_text(911223344.0), "911223344");
        assert_eq!(float_text(251911223344.0), "251911223344");
        assert_eq!(float_text(3.5), "3.5");
    }

    #[test]
    fn workbook_parse_failure_is_reported() {
        let result = ingest_values(b"not a workbook", FileKind::Workbook, DelimiterChoice::Auto);
        assert!(matches!(result, Err(SiftError::Parse(_))));
    }
}
