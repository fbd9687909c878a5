//! Row shape, synonym-based field resolution, and type coercion.
//!
//! A [`Row`] is one unit of raw tabular input: an insertion-ordered mapping
//! from header label to raw string value. Headers match case-insensitively;
//! values are kept verbatim and trimmed at resolution time.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

/// One row of raw tabular input.
#[derive(Debug, Clone, Default)]
pub struct Row {
    cells: IndexMap<String, String>,
}

impl Row {
    pub fn new() -> Self {
        Self { cells: IndexMap::new() }
    }

    /// Build a row from (header, value) pairs, keeping insertion order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut row = Self::new();
        for (k, v) in pairs {
            row.insert(k, v);
        }
        row
    }

    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(header.into(), value.into());
    }

    /// Look up a single header, case-insensitively. Returns the raw value.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(header))
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.cells.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when every cell is blank (used to skip padding rows).
    pub fn is_blank(&self) -> bool {
        self.cells.values().all(|v| v.trim().is_empty())
    }

    /// Render the row as a JSON object, headers in insertion order.
    pub fn to_value(&self) -> Value {
        let mut obj = Map::new();
        for (k, v) in &self.cells {
            obj.insert(k.clone(), Value::String(v.clone()));
        }
        Value::Object(obj)
    }
}

/// Resolve one logical field from a row given its ordered synonym list.
///
/// Candidates are tried in priority order; for each candidate every row
/// header is scanned case-insensitively and the first present, non-blank
/// value wins. Exhausts a candidate before falling through to the next, so
/// a lower-priority synonym never shadows a higher-priority one.
pub fn resolve<'r>(row: &'r Row, candidates: &[&str]) -> Option<&'r str> {
    for candidate in candidates {
        for (header, value) in row.iter() {
            if header.eq_ignore_ascii_case(candidate) {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed);
                }
            }
        }
    }
    None
}

// =============================================================================
// Coercion
// =============================================================================

/// Outcome of coercing a resolved field value.
///
/// The caller's policy decides what `Malformed` means: optional fields drop
/// the value, required numerics reject the whole row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<T> {
    /// Parsed successfully.
    Value(T),
    /// Field absent or blank.
    Absent,
    /// Present but unparseable.
    Malformed,
}

impl<T> Outcome<T> {
    /// Collapse to `Some` only on success.
    pub fn ok(self) -> Option<T> {
        match self {
            Outcome::Value(v) => Some(v),
            _ => None,
        }
    }
}

/// Coerce a resolved value to an integer.
pub fn coerce_int(raw: Option<&str>) -> Outcome<i64> {
    match raw {
        None => Outcome::Absent,
        Some(s) => {
            let s = s.trim();
            if s.is_empty() {
                Outcome::Absent
            } else {
                match s.parse::<i64>() {
                    Ok(n) => Outcome::Value(n),
                    Err(_) => Outcome::Malformed,
                }
            }
        }
    }
}

/// Coerce a resolved value to a boolean.
///
/// `true`/`yes`/`1` (case-insensitive) are true; anything else present is
/// false; absent input takes the caller's default. Never fails.
pub fn coerce_bool(raw: Option<&str>, default: bool) -> bool {
    match raw {
        None => default,
        Some(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "1"
        ),
    }
}

/// Split a semicolon-delimited list; items trimmed, empties discarded.
pub fn split_list(raw: &str) -> Vec<&str> {
    raw.split(';')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}

/// Split a list item into its primary value and an attached attribute
/// (`10.0.0.5|AA:BB:CC:DD:EE:FF` → value + hardware id).
pub fn split_pair(raw: &str) -> (&str, Option<&str>) {
    match raw.split_once('|') {
        Some((value, attr)) => {
            let attr = attr.trim();
            (value.trim(), if attr.is_empty() { None } else { Some(attr) })
        }
        None => (raw.trim(), None),
    }
}

static MAC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9A-Fa-f]{2}[:\-]){5}[0-9A-Fa-f]{2}$").expect("valid MAC pattern")
});

/// True when the value has the six-octet hardware-address shape.
pub fn is_mac(value: &str) -> bool {
    MAC_RE.is_match(value.trim())
}

/// True for a well-formed MAC whose octets are all zero.
pub fn is_zero_mac(value: &str) -> bool {
    is_mac(value) && value.chars().filter(|c| c.is_ascii_hexdigit()).all(|c| c == '0')
}
