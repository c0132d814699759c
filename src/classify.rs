//! Row and cell classification over an aligned pair

use crate::snapshot::{AlignedPair, CellStatus, Row, RowStatus};

/// Classify every aligned row pair, writing row and cell statuses in place.
pub fn classify_pair(pair: &mut AlignedPair) {
    let primary_key = pair.left.primary_key.clone();
    for (left, right) in pair.left.rows.iter_mut().zip(pair.right.rows.iter_mut()) {
        classify_rows(left, right, &primary_key);
    }
}

/// Classify one aligned row pair.
///
/// Placeholder checks run before value comparison: a row that is entirely
/// Null on one side is Added or Deleted, never Modified, regardless of how
/// the other side's values read. Value comparison goes through canonical
/// string forms, embedded line breaks included.
pub fn classify_rows(left: &mut Row, right: &mut Row, primary_key: &str) -> RowStatus {
    let status = if left.is_placeholder(primary_key) {
        RowStatus::Added
    } else if right.is_placeholder(primary_key) {
        RowStatus::Deleted
    } else {
        let changed = changed_columns(left, right);
        if changed.is_empty() {
            RowStatus::None
        } else {
            for row in [&mut *left, &mut *right] {
                for (name, cell) in row.cells.iter_mut() {
                    cell.status = if changed.iter().any(|c| c == name) {
                        CellStatus::CellChanged
                    } else {
                        CellStatus::RowChanged
                    };
                }
            }
            RowStatus::Modified
        }
    };

    left.status = status;
    right.status = status;
    status
}

/// Columns present in both rows whose canonical forms differ
pub fn changed_columns(left: &Row, right: &Row) -> Vec<String> {
    left.cells
        .iter()
        .filter_map(|(name, cell)| {
            let counterpart = right.cells.get(name)?;
            if cell.value.canonical_string() != counterpart.value.canonical_string() {
                Some(name.clone())
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Cell;
    use crate::value::Scalar;

    fn row(values: &[(&str, Scalar)]) -> Row {
        let mut row = Row::new();
        for (name, value) in values {
            row.cells.insert(name.to_string(), Cell::new(value.clone()));
        }
        row
    }

    #[test]
    fn test_identical_rows_are_none() {
        let mut a = row(&[("id", Scalar::Integer(1)), ("v", Scalar::Text("x".into()))]);
        let mut b = a.clone();

        assert_eq!(classify_rows(&mut a, &mut b, "id"), RowStatus::None);
        assert_eq!(a.status, RowStatus::None);
        assert!(a.cells.values().all(|c| c.status == CellStatus::Unchanged));
    }

    #[test]
    fn test_modified_row_marks_cells() {
        let mut a = row(&[("id", Scalar::Integer(1)), ("val", Scalar::Text("foo".into()))]);
        let mut b = row(&[("id", Scalar::Integer(1)), ("val", Scalar::Text("bar".into()))]);

        assert_eq!(classify_rows(&mut a, &mut b, "id"), RowStatus::Modified);
        assert_eq!(a.get("val").unwrap().status, CellStatus::CellChanged);
        assert_eq!(b.get("val").unwrap().status, CellStatus::CellChanged);
        // the key itself did not change, but its row did
        assert_eq!(a.get("id").unwrap().status, CellStatus::RowChanged);
        assert_eq!(b.get("id").unwrap().status, CellStatus::RowChanged);
    }

    #[test]
    fn test_placeholder_on_left_is_added() {
        let mut a = row(&[("id", Scalar::Integer(3)), ("v", Scalar::Null)]);
        let mut b = row(&[("id", Scalar::Integer(3)), ("v", Scalar::Text("z".into()))]);

        assert_eq!(classify_rows(&mut a, &mut b, "id"), RowStatus::Added);
        assert_eq!(a.status.abbreviation(), "A");
        assert_eq!(b.status.abbreviation(), "A");
    }

    #[test]
    fn test_placeholder_on_right_is_deleted() {
        let mut a = row(&[("id", Scalar::Integer(2)), ("v", Scalar::Text("y".into()))]);
        let mut b = row(&[("id", Scalar::Integer(2)), ("v", Scalar::Null)]);

        assert_eq!(classify_rows(&mut a, &mut b, "id"), RowStatus::Deleted);
        assert_eq!(a.status.abbreviation(), "D");
    }

    #[test]
    fn test_placeholder_check_precedes_value_comparison() {
        // all-Null on the left even though the rows also differ in shape
        let mut a = row(&[("id", Scalar::Integer(1)), ("v", Scalar::Null)]);
        let mut b = row(&[("id", Scalar::Text("1".into())), ("v", Scalar::Integer(9))]);

        assert_eq!(classify_rows(&mut a, &mut b, "id"), RowStatus::Added);
    }

    #[test]
    fn test_embedded_newlines_compare_raw() {
        let mut a = row(&[("id", Scalar::Integer(1)), ("v", Scalar::Text("a\nb".into()))]);
        let mut b = row(&[("id", Scalar::Integer(1)), ("v", Scalar::Text("a\nb".into()))]);

        assert_eq!(classify_rows(&mut a, &mut b, "id"), RowStatus::None);
    }

    #[test]
    fn test_changed_columns_ignores_one_sided_columns() {
        let a = row(&[("id", Scalar::Integer(1)), ("extra", Scalar::Text("x".into()))]);
        let b = row(&[("id", Scalar::Integer(1))]);

        assert!(changed_columns(&a, &b).is_empty());
    }
}
