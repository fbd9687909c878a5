//! # gridload - DNS/DHCP change-request transformation
//!
//! gridload transforms tabular change requests (CSV or spreadsheet rows
//! describing DNS and DHCP objects) into canonical per-kind JSON artifacts
//! for a downstream provisioning pipeline.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌────────────┐     ┌────────────────┐     ┌──────────────┐
//! │ CSV / sheet  │────▶│   Reader   │────▶│ Canonicalizers │────▶│ <kind>.json  │
//! │ (auto-enc)   │     │  (→ Rows)  │     │  (per kind)    │     │  (ordered)   │
//! └──────────────┘     └────────────┘     └────────────────┘     └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::path::Path;
//!
//! let summary = gridload::batch::run(
//!     Path::new("a_record_batch.csv"),
//!     None,                    // kind auto-detected from the file name
//!     Path::new("out"),
//!     None,                    // delimiter sniffed
//! )?;
//! println!("{} documents written", summary.converted);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`row`] - Row shape, field resolution, type coercion
//! - [`reader`] - CSV and spreadsheet row sources
//! - [`canonical`] - Per-kind canonicalizers
//! - [`catalog`] - Kind descriptors and auto-detection
//! - [`batch`] - Batch driver
//! - [`logs`] - Progress reporting

// Core modules
pub mod error;
pub mod logs;
pub mod row;

// Row sources
pub mod reader;

// Canonicalization
pub mod canonical;
pub mod catalog;

// Batch driver
pub mod batch;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{BatchError, KindError, SourceError};

// =============================================================================
// Re-exports - Row / resolution
// =============================================================================

pub use row::{coerce_bool, coerce_int, resolve, split_list, split_pair, Outcome, Row};

// =============================================================================
// Re-exports - Readers
// =============================================================================

pub use reader::{detect_delimiter, detect_encoding, read_rows, ReadResult};

// =============================================================================
// Re-exports - Canonicalization
// =============================================================================

pub use canonical::{harvest_extattrs, synonyms, Canonical, Rejection};

// =============================================================================
// Re-exports - Catalog
// =============================================================================

pub use catalog::{detect_kind, get, KindDescriptor, CATALOG};

// =============================================================================
// Re-exports - Batch driver
// =============================================================================

pub use batch::{process, run, BatchOutcome, BatchSummary, RowWarning};
