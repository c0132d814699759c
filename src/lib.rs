//! # sqlitediff
//!
//! Compares two SQLite databases table by table. Rows are aligned by a
//! single-column primary key, classified as added, deleted, modified or
//! unchanged down to cell level, and emitted as annotated grids ready for
//! rendering.

pub mod align;
pub mod classify;
pub mod cli;
pub mod commands;
pub mod database;
pub mod diff;
pub mod error;
pub mod grid;
pub mod output;
pub mod snapshot;
pub mod value;

pub use error::{Result, SqliteDiffError};
pub use snapshot::{AlignedPair, Cell, CellStatus, Row, RowStatus, Snapshot};
pub use value::Scalar;

/// Name of the synthetic column that carries the row status abbreviation
pub const STATUS_COLUMN: &str = "_status_";

/// Header text of the synthetic status column
pub const STATUS_HEADER: &str = "!";
