//! Spreadsheet row source.
//!
//! Reads the first worksheet of an xlsx/xls/ods workbook into the same
//! [`Row`] shape as the CSV reader. Numeric cells holding whole numbers are
//! rendered without a trailing `.0`; NaN, error, and empty cells normalize
//! to absent.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use super::ReadResult;
use crate::error::{SourceError, SourceResult};
use crate::row::Row;

/// Read the first worksheet of a workbook into rows.
pub fn read_sheet(path: &Path) -> SourceResult<ReadResult> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| SourceError::Sheet(e.to_string()))?;

    let sheet_names = workbook.sheet_names();
    let first = sheet_names.first().cloned().ok_or(SourceError::EmptyFile)?;

    let range = workbook
        .worksheet_range(&first)
        .map_err(|e| SourceError::Sheet(e.to_string()))?;

    let mut row_iter = range.rows();
    let header_cells = row_iter.next().ok_or(SourceError::EmptyFile)?;

    let headers: Vec<String> = header_cells
        .iter()
        .map(|cell| cell_text(cell).unwrap_or_default())
        .collect();

    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(SourceError::NoHeaders);
    }

    let mut rows = Vec::new();
    for cells in row_iter {
        let row = Row::from_pairs(headers.iter().enumerate().filter_map(|(i, header)| {
            if header.trim().is_empty() {
                return None;
            }
            let value = cells.get(i).and_then(cell_text).unwrap_or_default();
            Some((header.clone(), value))
        }));
        if row.is_blank() {
            continue;
        }
        rows.push(row);
    }

    Ok(ReadResult {
        rows,
        headers,
        encoding: None,
        delimiter: None,
    })
}

/// Render a cell as text; `None` means absent.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::Error(_) => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => {
            if f.is_nan() {
                None
            } else if f.fract() == 0.0 && f.is_finite() && f.abs() < i64::MAX as f64 {
                // Spreadsheets store integers as floats; 43200.0 must emit
                // as "43200".
                Some(((*f) as i64).to_string())
            } else {
                Some(f.to_string())
            }
        }
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(dt.as_f64().to_string()),
        Data::DateTimeIso(s) => Some(s.clone()),
        Data::DurationIso(s) => Some(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_float_renders_without_decimal() {
        assert_eq!(cell_text(&Data::Float(43200.0)), Some("43200".to_string()));
        assert_eq!(cell_text(&Data::Float(10.0)), Some("10".to_string()));
    }

    #[test]
    fn test_fractional_float_keeps_decimal() {
        assert_eq!(cell_text(&Data::Float(1.5)), Some("1.5".to_string()));
    }

    #[test]
    fn test_nan_is_absent() {
        assert_eq!(cell_text(&Data::Float(f64::NAN)), None);
    }

    #[test]
    fn test_empty_and_error_are_absent() {
        assert_eq!(cell_text(&Data::Empty), None);
        assert_eq!(
            cell_text(&Data::Error(calamine::CellErrorType::Div0)),
            None
        );
    }

    #[test]
    fn test_string_and_bool_cells() {
        assert_eq!(
            cell_text(&Data::String("default".into())),
            Some("default".to_string())
        );
        assert_eq!(cell_text(&Data::Bool(true)), Some("true".to_string()));
    }
}
