//! In-memory model of a loaded table and its diff annotations

use crate::value::Scalar;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Overall classification of an aligned row pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowStatus {
    None,
    Added,
    Deleted,
    Modified,
}

impl RowStatus {
    /// Abbreviation shown in the synthetic status column
    pub fn abbreviation(&self) -> &'static str {
        match self {
            RowStatus::None => "",
            RowStatus::Added => "A",
            RowStatus::Deleted => "D",
            RowStatus::Modified => "M",
        }
    }
}

/// Per-cell classification within an aligned row pair.
///
/// `RowChanged` marks a cell whose own value is unchanged but which sits in a
/// modified row; `CellChanged` marks a cell whose value differs from its
/// counterpart. Added and deleted rows carry their highlight at row level, so
/// their cells stay `Unchanged`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellStatus {
    Unchanged,
    RowChanged,
    CellChanged,
}

/// A single annotated value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub value: Scalar,
    pub status: CellStatus,
}

impl Cell {
    pub fn new(value: Scalar) -> Self {
        Self {
            value,
            status: CellStatus::Unchanged,
        }
    }

    pub fn null() -> Self {
        Self::new(Scalar::Null)
    }
}

/// One table row: cells in schema order plus the row-level status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub status: RowStatus,
    pub cells: IndexMap<String, Cell>,
}

impl Row {
    pub fn new() -> Self {
        Self {
            status: RowStatus::None,
            cells: IndexMap::new(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.cells.get(column)
    }

    /// The primary-key value of this row, Null when the column is absent
    pub fn key(&self, primary_key: &str) -> Scalar {
        self.cells
            .get(primary_key)
            .map(|cell| cell.value.clone())
            .unwrap_or(Scalar::Null)
    }

    /// True when every non-key cell is Null, i.e. the row was synthesized by
    /// the aligner to stand in for a key missing from this side.
    pub fn is_placeholder(&self, primary_key: &str) -> bool {
        self.cells
            .iter()
            .filter(|(name, _)| name.as_str() != primary_key)
            .all(|(_, cell)| cell.value.is_null())
    }
}

impl Default for Row {
    fn default() -> Self {
        Self::new()
    }
}

/// One table's rows and schema as produced by the snapshot provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Name of the single-column primary key
    pub primary_key: String,
    /// Column names in declaration order
    pub schema: Vec<String>,
    pub rows: Vec<Row>,
}

impl Snapshot {
    pub fn new(primary_key: impl Into<String>, schema: Vec<String>) -> Self {
        Self {
            primary_key: primary_key.into(),
            schema,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Two snapshots padded and sorted to the same key sequence.
///
/// Invariant: equal length, and position `i` of each side holds the same
/// primary-key value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedPair {
    pub left: Snapshot,
    pub right: Snapshot,
}

impl AlignedPair {
    pub fn len(&self) -> usize {
        self.left.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.rows.is_empty()
    }
}
