use std::fmt;

use serde::Serialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// RawTable – the loaded CSV/JSON table, all cells as strings
// ---------------------------------------------------------------------------

/// The full loaded table: one header row plus data rows.
///
/// Cells are kept as raw strings; no type guessing happens here. The table is
/// immutable once loaded and replaced wholesale when a new file is opened.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Ordered column names from the header row.
    pub headers: Vec<String>,
    /// Data rows. Rows may be shorter than the header row (ragged input);
    /// missing trailing cells read back as empty strings.
    pub rows: Vec<Vec<String>>,
    /// File name of the source, used for the export filename.
    pub source_name: String,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>, source_name: String) -> Self {
        RawTable {
            headers,
            rows,
            source_name,
        }
    }

    /// Index of the first header matching `name` exactly.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// One cell per row for the given column. A row without that cell
    /// yields `""`.
    pub fn column_values(&self, idx: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(idx).map_or("", String::as_str))
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// NgramKind – which of the three token lists is being addressed
// ---------------------------------------------------------------------------

/// The three n-gram sizes the pipeline produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NgramKind {
    Unigram,
    Bigram,
    Trigram,
}

impl NgramKind {
    pub const ALL: [NgramKind; 3] = [NgramKind::Unigram, NgramKind::Bigram, NgramKind::Trigram];

    /// Window size of this kind.
    pub fn n(self) -> usize {
        match self {
            NgramKind::Unigram => 1,
            NgramKind::Bigram => 2,
            NgramKind::Trigram => 3,
        }
    }

    /// Column/display label, matching the exported CSV headers.
    pub fn label(self) -> &'static str {
        match self {
            NgramKind::Unigram => "Unigrams",
            NgramKind::Bigram => "Bigrams",
            NgramKind::Trigram => "Trigrams",
        }
    }
}

impl fmt::Display for NgramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// TokenRecord – per-row tokenization result
// ---------------------------------------------------------------------------

/// Separator between token strings inside a [`TokenRecord`] field.
pub const TOKEN_SEPARATOR: &str = ", ";

/// Tokens derived from one row's selected cell.
///
/// Each field is a `", "`-joined list of de-duplicated token strings in
/// first-occurrence order, kept as a flat string so it drops straight into a
/// CSV cell on export. An empty list is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenRecord {
    pub unigrams: String,
    pub bigrams: String,
    pub trigrams: String,
}

impl TokenRecord {
    /// The joined field for one kind.
    pub fn field(&self, kind: NgramKind) -> &str {
        match kind {
            NgramKind::Unigram => &self.unigrams,
            NgramKind::Bigram => &self.bigrams,
            NgramKind::Trigram => &self.trigrams,
        }
    }

    /// Iterate the individual token strings of one kind.
    ///
    /// An empty field yields nothing rather than a single empty token.
    pub fn tokens(&self, kind: NgramKind) -> impl Iterator<Item = &str> + '_ {
        self.field(kind)
            .split(TOKEN_SEPARATOR)
            .filter(|token| !token.is_empty())
    }
}

// ---------------------------------------------------------------------------
// WordFreq / Frequencies – aggregated counts for the word cloud
// ---------------------------------------------------------------------------

/// One word-cloud entry: a token string and its occurrence count across all
/// records. Serializes as `{"text": ..., "value": ...}` for external
/// renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordFreq {
    pub text: String,
    pub value: usize,
}

/// Frequency-ranked word lists, one per n-gram kind.
///
/// Derived from the current record set on demand and never stored durably.
/// List order is deterministic (sorted by token) but carries no meaning;
/// consumers sort or bucket by `value` for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frequencies {
    pub unigrams: Vec<WordFreq>,
    pub bigrams: Vec<WordFreq>,
    pub trigrams: Vec<WordFreq>,
}

impl Frequencies {
    /// The list for one kind.
    pub fn kind(&self, kind: NgramKind) -> &[WordFreq] {
        match kind {
            NgramKind::Unigram => &self.unigrams,
            NgramKind::Bigram => &self.bigrams,
            NgramKind::Trigram => &self.trigrams,
        }
    }
}

// ---------------------------------------------------------------------------
// TableError – typed errors of the data layer
// ---------------------------------------------------------------------------

/// Errors raised by the data layer and the session adapter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("column '{0}' not found in header row")]
    ColumnNotFound(String),
    #[error("no table loaded")]
    NoTable,
    #[error("no column selected")]
    NoActiveColumn,
    #[error("{records} token records for {rows} table rows")]
    RecordCountMismatch { rows: usize, records: usize },
}
