//! Annotated grid assembly for the presentation layer

use crate::snapshot::Row;
use crate::{STATUS_COLUMN, STATUS_HEADER};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Display width policy for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnWidth {
    /// Fixed character width
    Fixed(u16),
    /// Share the remaining width with the other fill columns
    Fill,
}

/// Header text, binding key and width policy for one grid column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub header: String,
    pub binding: String,
    pub width: ColumnWidth,
}

/// One side's renderable output: ordered column descriptors plus the
/// classified rows they bind to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<Row>,
}

/// Assemble the grid for one side.
///
/// The synthetic status column always leads. Data columns are the union of
/// column names over every row, ordered by first appearance while scanning
/// top to bottom, so the layout is reproducible across runs.
pub fn build(rows: Vec<Row>) -> Grid {
    let mut columns = vec![ColumnDescriptor {
        header: STATUS_HEADER.to_string(),
        binding: STATUS_COLUMN.to_string(),
        width: ColumnWidth::Fixed(3),
    }];

    let mut seen: IndexSet<String> = IndexSet::new();
    for row in &rows {
        for name in row.cells.keys() {
            seen.insert(name.clone());
        }
    }
    columns.extend(seen.into_iter().map(|name| ColumnDescriptor {
        header: name.clone(),
        binding: name,
        width: ColumnWidth::Fill,
    }));

    Grid { columns, rows }
}

/// Display-only visualization of line breaks: every CRLF, CR or LF becomes a
/// marker glyph followed by an explicit newline, so wrapped cells show their
/// control characters instead of silently re-flowing. Never used during
/// classification.
pub fn visualize_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                    out.push('↵');
                } else {
                    out.push('⇠');
                }
                out.push('\n');
            }
            '\n' => {
                out.push('⇣');
                out.push('\n');
            }
            _ => out.push(c),
        }
    }
    out
}
