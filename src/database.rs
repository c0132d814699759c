//! Snapshot provider backed by SQLite files

use crate::error::{Result, SqliteDiffError};
use crate::snapshot::{Cell, Row, Snapshot};
use crate::value::Scalar;
use rusqlite::{Connection, OpenFlags};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A user table and its inferred primary key, if any
#[derive(Debug, Clone, Serialize)]
pub struct TableInfo {
    pub name: String,
    pub primary_key: Option<String>,
}

/// Read-only handle on one SQLite database file
#[derive(Debug)]
pub struct Database {
    conn: Connection,
    path: PathBuf,
}

impl Database {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(SqliteDiffError::DatabaseNotFound {
                path: path.to_path_buf(),
            });
        }

        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List user tables with their inferred single-column primary key.
    ///
    /// A table qualifies for diffing only when exactly one column has key
    /// rank 1 and no column has a higher rank; composite keys report `None`.
    pub fn list_tables(&self) -> Result<Vec<TableInfo>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut tables = Vec::with_capacity(names.len());
        for name in names {
            let primary_key = self.primary_key_column(&name)?;
            tables.push(TableInfo { name, primary_key });
        }
        Ok(tables)
    }

    /// Materialize a whole table into an ordered snapshot.
    pub fn load_table(&self, table: &str) -> Result<Snapshot> {
        if !self.table_exists(table)? {
            return Err(SqliteDiffError::table_not_found(table));
        }

        let primary_key = self
            .primary_key_column(table)?
            .ok_or_else(|| SqliteDiffError::missing_primary_key(table))?;
        let schema = self.column_names(table)?;

        let mut stmt = self
            .conn
            .prepare(&format!("SELECT * FROM {}", quote_identifier(table)))?;
        let column_count = stmt.column_count();

        let mut snapshot = Snapshot::new(primary_key, schema.clone());
        let mut rows = stmt.query([])?;
        while let Some(db_row) = rows.next()? {
            let mut row = Row::new();
            for (i, name) in schema.iter().enumerate().take(column_count) {
                let value = Scalar::from(db_row.get_ref(i)?);
                row.cells.insert(name.clone(), Cell::new(value));
            }
            snapshot.rows.push(row);
        }

        log::debug!(
            "Loaded {} rows from table '{}' in {}",
            snapshot.len(),
            table,
            self.path.display()
        );
        Ok(snapshot)
    }

    fn table_exists(&self, table: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Column names in declaration order from `PRAGMA table_info`
    fn column_names(&self, table: &str) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(&format!("PRAGMA table_info({})", quote_identifier(table)))?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(names)
    }

    /// The column with key rank 1, or `None` when the table has no primary
    /// key or a composite one
    fn primary_key_column(&self, table: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare(&format!("PRAGMA table_info({})", quote_identifier(table)))?;
        let key_columns = stmt
            .query_map([], |row| {
                let name: String = row.get(1)?;
                let rank: i64 = row.get(5)?;
                Ok((name, rank))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let ranked: Vec<_> = key_columns.into_iter().filter(|(_, rank)| *rank > 0).collect();
        match ranked.as_slice() {
            [(name, 1)] => Ok(Some(name.clone())),
            _ => Ok(None),
        }
    }
}

/// Outcome of the per-table overview of two databases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableState {
    Same,
    Different,
    LeftOnly,
    RightOnly,
}

/// One table's entry in the two-database overview
#[derive(Debug, Clone, Serialize)]
pub struct TableComparison {
    pub name: String,
    pub state: TableState,
}

/// Compare the table lists of two databases, probing tables present on both
/// sides for data differences.
pub fn compare_tables(left: &Database, right: &Database) -> Result<Vec<TableComparison>> {
    let left_names: Vec<String> = left.list_tables()?.into_iter().map(|t| t.name).collect();
    let right_names: Vec<String> = right.list_tables()?.into_iter().map(|t| t.name).collect();

    let mut names: Vec<String> = left_names.clone();
    for name in &right_names {
        if !left_names.contains(name) {
            names.push(name.clone());
        }
    }
    names.sort();

    let mut comparisons = Vec::with_capacity(names.len());
    for name in names {
        let state = match (left_names.contains(&name), right_names.contains(&name)) {
            (true, true) => {
                if has_differences(left, right, &name)? {
                    TableState::Different
                } else {
                    TableState::Same
                }
            }
            (true, false) => TableState::LeftOnly,
            (false, true) => TableState::RightOnly,
            (false, false) => unreachable!(),
        };
        comparisons.push(TableComparison { name, state });
    }
    Ok(comparisons)
}

/// Streaming equality probe: true when the two databases hold different data
/// for `table`. Orders both sides by every column and compares canonical row
/// images, so it never builds grids or placeholder rows.
pub fn has_differences(left: &Database, right: &Database, table: &str) -> Result<bool> {
    let columns = left.column_names(table)?;
    if columns.is_empty() {
        return Ok(false);
    }

    let column_list = columns
        .iter()
        .map(|c| quote_identifier(c))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        column_list,
        quote_identifier(table),
        column_list
    );

    let mut stmt_left = left.conn.prepare(&sql)?;
    let mut stmt_right = right.conn.prepare(&sql)?;
    let mut rows_left = stmt_left.query([])?;
    let mut rows_right = stmt_right.query([])?;

    loop {
        let next_left = rows_left.next()?;
        let next_right = rows_right.next()?;
        match (next_left, next_right) {
            (None, None) => return Ok(false),
            (Some(a), Some(b)) => {
                for i in 0..columns.len() {
                    let va = Scalar::from(a.get_ref(i)?);
                    let vb = Scalar::from(b.get_ref(i)?);
                    if va.canonical_string() != vb.canonical_string() {
                        return Ok(true);
                    }
                }
            }
            _ => return Ok(true),
        }
    }
}

/// Double-quote an identifier for embedding in SQL text
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("users"), "\"users\"");
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }
}
