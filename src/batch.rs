//! Batch driver: rows in, one canonical JSON artifact out.
//!
//! Rows are processed strictly in source order; a rejected row is reported
//! and skipped, never fatal. Only an unreadable source or an unresolvable
//! kind aborts the batch.

use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::canonical::Canonical;
use crate::catalog::{self, KindDescriptor};
use crate::error::{BatchResult, KindError, KindResult};
use crate::logs::{log_info, log_success, log_warning};
use crate::reader;
use crate::row::Row;

/// A per-row warning, tagged with the 1-based data-row position (the
/// header row is not counted).
#[derive(Debug, Clone)]
pub struct RowWarning {
    pub row: usize,
    pub message: String,
}

impl fmt::Display for RowWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}", self.row, self.message)
    }
}

/// Result of canonicalizing one batch of rows.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Canonical documents in row-encounter order.
    pub documents: Vec<Value>,
    /// Per-row warnings: rejections and dropped-field notes.
    pub warnings: Vec<RowWarning>,
    /// Number of rows that produced no document.
    pub rejected: usize,
}

/// Canonicalize rows for one kind. Never fails; per-row problems become
/// warnings.
pub fn process(rows: &[Row], descriptor: &KindDescriptor) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    for (idx, row) in rows.iter().enumerate() {
        let position = idx + 1;
        match (descriptor.canonicalize)(row) {
            Ok(Canonical { doc, dropped }) => {
                for field in dropped {
                    outcome.warnings.push(RowWarning {
                        row: position,
                        message: format!("dropped malformed field '{}'", field),
                    });
                }
                outcome.documents.push(doc);
            }
            Err(rejection) => {
                outcome.rejected += 1;
                outcome.warnings.push(RowWarning {
                    row: position,
                    message: rejection.describe(),
                });
            }
        }
    }

    outcome
}

/// Summary of one completed batch run.
#[derive(Debug)]
pub struct BatchSummary {
    pub kind: String,
    pub artifact: PathBuf,
    pub total_rows: usize,
    pub converted: usize,
    pub rejected: usize,
    pub warnings: Vec<RowWarning>,
}

/// Resolve the kind for a run: explicit identifier wins, otherwise the
/// dispatcher detects it from the input file name.
pub fn resolve_descriptor(
    input: &Path,
    kind: Option<&str>,
) -> KindResult<&'static KindDescriptor> {
    match kind {
        Some(k) => catalog::get(k).ok_or_else(|| KindError::Unknown(k.to_string())),
        None => {
            let base = input
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            catalog::detect_kind(base).ok_or_else(|| KindError::Undetectable(base.to_string()))
        }
    }
}

/// Run a full batch: read the source, canonicalize every row, write the
/// per-kind artifact under `out_dir`.
pub fn run(
    input: &Path,
    kind: Option<&str>,
    out_dir: &Path,
    delimiter: Option<char>,
) -> BatchResult<BatchSummary> {
    let descriptor = resolve_descriptor(input, kind)?;
    log_info(format!("Kind: {}", descriptor.kind));

    let read = reader::read_rows(input, delimiter)?;
    if let Some(encoding) = &read.encoding {
        log_info(format!("Encoding: {}", encoding));
    }
    if let Some(delimiter) = read.delimiter {
        log_info(format!("Delimiter: '{}'", format_delimiter(delimiter)));
    }
    log_success(format!("Read {} rows", read.rows.len()));

    let outcome = process(&read.rows, descriptor);
    for warning in &outcome.warnings {
        log_warning(warning.to_string());
    }

    std::fs::create_dir_all(out_dir)?;
    let artifact = out_dir.join(descriptor.artifact);
    let mut json = serde_json::to_string_pretty(&outcome.documents)?;
    json.push('\n');
    std::fs::write(&artifact, json)?;
    log_success(format!(
        "Wrote {} documents to {}",
        outcome.documents.len(),
        artifact.display()
    ));

    Ok(BatchSummary {
        kind: descriptor.kind.to_string(),
        artifact,
        total_rows: read.rows.len(),
        converted: outcome.documents.len(),
        rejected: outcome.rejected,
        warnings: outcome.warnings,
    })
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}
