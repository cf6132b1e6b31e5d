use std::collections::BTreeSet;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Sides
// ---------------------------------------------------------------------------

/// Which of the two inputs a value came from. Left is source A, right is B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    /// Label used when the config does not name the source.
    pub fn default_label(&self) -> &'static str {
        match self {
            Side::Left => "A",
            Side::Right => "B",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Position of the first data row: row 1 is the header.
pub const FIRST_DATA_ROW: usize = 2;

/// A single normalized row. Keys are never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub key: String,
    pub tag: String,
    pub serial: String,
    /// 1-based row in the input file, header included.
    pub position: usize,
}

impl Record {
    /// Normalize raw cell values. Returns `None` for a blank key.
    pub fn from_raw(key: &str, tag: &str, serial: &str, position: usize) -> Option<Self> {
        let key = normalize_key(key);
        if key.is_empty() {
            return None;
        }
        Some(Self {
            key,
            tag: normalize_field(tag),
            serial: normalize_field(serial),
            position,
        })
    }
}

pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_string()
}

/// Tags and serials compare case-insensitively, so they are stored uppercased.
pub fn normalize_field(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Records loaded from one input, in file order.
#[derive(Debug, Clone)]
pub struct Source {
    pub label: String,
    pub records: Vec<Record>,
    /// Data rows dropped because their key was blank.
    pub blank_keys: usize,
}

impl Source {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            records: Vec::new(),
            blank_keys: 0,
        }
    }

    /// Normalize and append one data row; blank keys are counted and dropped.
    pub fn push_row(&mut self, position: usize, key: &str, tag: &str, serial: &str) {
        match Record::from_raw(key, tag, serial, position) {
            Some(record) => self.records.push(record),
            None => self.blank_keys += 1,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Duplicates
// ---------------------------------------------------------------------------

/// A key seen on two or more rows of the same source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateKey {
    pub key: String,
    pub positions: Vec<usize>,
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

/// Key present on both sides with the same tag and serial.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ExactMatch {
    pub key: String,
    pub left_positions: Vec<usize>,
    pub right_positions: Vec<usize>,
    pub tag: String,
    pub serial: String,
}

/// Key present on both sides whose tag or serial differs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Conflict {
    pub key: String,
    pub left_positions: Vec<usize>,
    pub right_positions: Vec<usize>,
    pub left_tag: String,
    pub left_serial: String,
    pub right_tag: String,
    pub right_serial: String,
}

impl Conflict {
    pub fn tag_differs(&self) -> bool {
        self.left_tag != self.right_tag
    }

    pub fn serial_differs(&self) -> bool {
        self.left_serial != self.right_serial
    }
}

/// Cross-file comparison of two sources.
///
/// Match and conflict order carries no meaning; only-sets are kept sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    pub exact_matches: Vec<ExactMatch>,
    pub conflicts: Vec<Conflict>,
    pub only_left: BTreeSet<String>,
    pub only_right: BTreeSet<String>,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SideSummary {
    pub rows: usize,
    pub blank_keys: usize,
    pub distinct_keys: usize,
    pub duplicate_keys: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconSummary {
    pub left: SideSummary,
    pub right: SideSummary,
    pub exact_matches: usize,
    pub conflicts: usize,
    pub only_left: usize,
    pub only_right: usize,
}

impl ReconSummary {
    /// Anything other than exact matches: duplicates, conflicts, one-sided keys.
    pub fn has_findings(&self) -> bool {
        self.left.duplicate_keys > 0
            || self.right.duplicate_keys > 0
            || self.conflicts > 0
            || self.only_left > 0
            || self.only_right > 0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub name: String,
    pub left_label: String,
    pub right_label: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconReport {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub left_duplicates: Vec<DuplicateKey>,
    pub right_duplicates: Vec<DuplicateKey>,
    pub reconciliation: Reconciliation,
}
