//! Key alignment: pad and sort two snapshots into the same key sequence

use crate::error::{Result, SqliteDiffError};
use crate::snapshot::{AlignedPair, Cell, Row, Snapshot};
use crate::value::Scalar;
use indexmap::IndexMap;

/// Align two snapshots of the same table by primary key.
///
/// The key union across both sides is computed, each side is padded with a
/// placeholder row for every key it lacks, and both sides are sorted by the
/// explicit key order from [`Scalar::key_cmp`]. On return both snapshots have
/// equal length and the same key at every position.
///
/// Duplicate key values within one snapshot are rejected with
/// [`SqliteDiffError::DuplicateKey`]; letting them through would silently
/// corrupt the positional pairing.
pub fn align(left: Snapshot, right: Snapshot) -> Result<AlignedPair> {
    let primary_key = left.primary_key.clone();

    let left_index = key_index(&left)?;
    let right_index = key_index(&right)?;

    // Union in scan order, keyed by canonical form so an Integer key and its
    // textual twin collapse to one entry.
    let mut combined: IndexMap<String, Scalar> = IndexMap::new();
    for snapshot in [&left, &right] {
        for row in &snapshot.rows {
            let key = row.key(&snapshot.primary_key);
            combined.entry(key.canonical_string()).or_insert(key);
        }
    }

    let mut sorted_keys: Vec<(String, Scalar)> = combined.into_iter().collect();
    sorted_keys.sort_by(|(_, a), (_, b)| a.key_cmp(b));

    // Placeholder rows need a column set; an empty side borrows the opposite
    // side's so both grids keep their full width.
    let left_template = placeholder_columns(&left, &right);
    let right_template = placeholder_columns(&right, &left);

    let left = reorder(left, &sorted_keys, &left_index, &left_template, &primary_key);
    let right = reorder(right, &sorted_keys, &right_index, &right_template, &primary_key);

    Ok(AlignedPair { left, right })
}

/// Map canonical key form to row position, rejecting duplicates
fn key_index(snapshot: &Snapshot) -> Result<IndexMap<String, usize>> {
    let mut index = IndexMap::with_capacity(snapshot.len());
    for (i, row) in snapshot.rows.iter().enumerate() {
        let key = row.key(&snapshot.primary_key).canonical_string();
        if index.insert(key.clone(), i).is_some() {
            return Err(SqliteDiffError::duplicate_key(&snapshot.primary_key, key));
        }
    }
    Ok(index)
}

fn placeholder_columns(snapshot: &Snapshot, opposite: &Snapshot) -> Vec<String> {
    if let Some(row) = snapshot.rows.first() {
        row.cells.keys().cloned().collect()
    } else if let Some(row) = opposite.rows.first() {
        row.cells.keys().cloned().collect()
    } else {
        vec![snapshot.primary_key.clone()]
    }
}

fn reorder(
    snapshot: Snapshot,
    sorted_keys: &[(String, Scalar)],
    index: &IndexMap<String, usize>,
    template: &[String],
    primary_key: &str,
) -> Snapshot {
    let Snapshot {
        schema, rows, ..
    } = snapshot;

    let mut slots: Vec<Option<Row>> = rows.into_iter().map(Some).collect();
    let mut aligned = Vec::with_capacity(sorted_keys.len());
    for (canonical, key) in sorted_keys {
        let row = match index.get(canonical) {
            Some(&i) => slots[i].take().unwrap_or_default(),
            None => placeholder_row(template, primary_key, key),
        };
        aligned.push(row);
    }

    Snapshot {
        primary_key: primary_key.to_string(),
        schema,
        rows: aligned,
    }
}

/// A stand-in row for a key this side lacks: the key cell holds the key,
/// every other column is Null
fn placeholder_row(template: &[String], primary_key: &str, key: &Scalar) -> Row {
    let mut row = Row::new();
    for column in template {
        let cell = if column == primary_key {
            Cell::new(key.clone())
        } else {
            Cell::null()
        };
        row.cells.insert(column.clone(), cell);
    }
    row
}
