//! Row-source readers: normalize CSV and spreadsheet input into [`Row`]s.
//!
//! Both formats produce the same row-mapping shape before reaching the
//! engine; no business rules live here. CSV input gets encoding and
//! delimiter auto-detection; spreadsheet input is handled in [`sheet`].

pub mod sheet;

use std::path::Path;

use crate::error::{SourceError, SourceResult};
use crate::row::Row;

/// Result of reading a row source, with detection metadata.
#[derive(Debug, Clone)]
pub struct ReadResult {
    /// Normalized rows, one per data line.
    pub rows: Vec<Row>,
    /// Column headers in source order.
    pub headers: Vec<String>,
    /// Detected encoding (CSV only).
    pub encoding: Option<String>,
    /// Detected or supplied delimiter (CSV only).
    pub delimiter: Option<char>,
}

/// Read an input artifact into rows, dispatching on the file extension.
pub fn read_rows(path: &Path, delimiter: Option<char>) -> SourceResult<ReadResult> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" | "tsv" | "txt" => read_csv_file(path, delimiter),
        "xlsx" | "xlsm" | "xls" | "ods" => sheet::read_sheet(path),
        other => Err(SourceError::UnsupportedFormat(format!(
            "{} (.{})",
            path.display(),
            other
        ))),
    }
}

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let (charset, _, _) = chardet::detect(bytes);

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the detected encoding.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.to_string()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.to_string(),
        _ => String::from_utf8_lossy(bytes).to_string(),
    }
}

/// Detect the delimiter by counting candidates in the first line, falling
/// back to comma.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Read a CSV file with encoding and delimiter auto-detection.
pub fn read_csv_file(path: &Path, delimiter: Option<char>) -> SourceResult<ReadResult> {
    let bytes = std::fs::read(path)?;
    read_csv_bytes(&bytes, delimiter)
}

/// Parse CSV bytes into rows.
///
/// Encoding is detected and normalized first; the delimiter is sniffed from
/// the first line unless supplied explicitly.
pub fn read_csv_bytes(bytes: &[u8], delimiter: Option<char>) -> SourceResult<ReadResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);

    if content.trim().is_empty() {
        return Err(SourceError::EmptyFile);
    }

    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(&content));

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(SourceError::NoHeaders);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = Row::from_pairs(headers.iter().enumerate().map(|(i, header)| {
            (header.clone(), record.get(i).unwrap_or("").to_string())
        }));
        if row.is_blank() {
            continue;
        }
        rows.push(row);
    }

    Ok(ReadResult {
        rows,
        headers,
        encoding: Some(encoding),
        delimiter: Some(delimiter),
    })
}
