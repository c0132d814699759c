//! Diff orchestration: align, classify, filter, build

use crate::align::align;
use crate::classify::classify_pair;
use crate::error::Result;
use crate::grid::{self, Grid};
use crate::snapshot::{Row, RowStatus, Snapshot};
use serde::Serialize;

/// Options for one diff invocation
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffOptions {
    /// Drop unchanged rows from both outputs ("diff-only context" view)
    pub changed_only: bool,
}

/// The two annotated grids produced by one diff invocation
#[derive(Debug, Clone, Serialize)]
pub struct TableDiff {
    pub left: Grid,
    pub right: Grid,
}

impl TableDiff {
    /// True when no row carries a status, i.e. both tables hold the same data
    pub fn is_unchanged(&self) -> bool {
        self.left
            .rows
            .iter()
            .chain(&self.right.rows)
            .all(|row| row.status == RowStatus::None)
    }
}

/// Run the whole pipeline over two freshly loaded snapshots.
///
/// This is a pure transform: fresh structures in, annotated grids out, no
/// state kept between invocations.
pub fn diff_snapshots(
    left: Snapshot,
    right: Snapshot,
    options: DiffOptions,
) -> Result<TableDiff> {
    let mut pair = align(left, right)?;
    classify_pair(&mut pair);

    let (mut left_rows, mut right_rows) = (pair.left.rows, pair.right.rows);
    if options.changed_only {
        left_rows = filter_changed(left_rows);
        right_rows = filter_changed(right_rows);
    }

    Ok(TableDiff {
        left: grid::build(left_rows),
        right: grid::build(right_rows),
    })
}

/// Context filter: keep only rows that carry a status
fn filter_changed(rows: Vec<Row>) -> Vec<Row> {
    rows.into_iter()
        .filter(|row| row.status != RowStatus::None)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Cell;
    use crate::value::Scalar;

    fn snapshot(rows: &[(i64, &str)]) -> Snapshot {
        let mut snap = Snapshot::new("id", vec!["id".to_string(), "name".to_string()]);
        for (id, name) in rows {
            let mut row = Row::new();
            row.cells
                .insert("id".to_string(), Cell::new(Scalar::Integer(*id)));
            row.cells
                .insert("name".to_string(), Cell::new(Scalar::Text(name.to_string())));
            snap.rows.push(row);
        }
        snap
    }

    #[test]
    fn test_identical_snapshots_are_unchanged() {
        let a = snapshot(&[(1, "x"), (2, "y")]);
        let diff = diff_snapshots(a.clone(), a, DiffOptions::default()).unwrap();
        assert!(diff.is_unchanged());
    }

    #[test]
    fn test_changed_only_filter_drops_unchanged_rows() {
        let a = snapshot(&[(1, "x"), (2, "y")]);
        let b = snapshot(&[(1, "x"), (3, "z")]);

        let options = DiffOptions { changed_only: true };
        let diff = diff_snapshots(a, b, options).unwrap();

        // id=1 is unchanged and omitted; id=2 (deleted) and id=3 (added) remain
        assert_eq!(diff.left.rows.len(), 2);
        assert_eq!(diff.right.rows.len(), 2);
        let keys: Vec<String> = diff
            .left
            .rows
            .iter()
            .map(|r| r.key("id").canonical_string())
            .collect();
        assert_eq!(keys, vec!["2", "3"]);
    }
}
