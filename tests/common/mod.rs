//! Common test utilities and helpers

#![allow(dead_code)]

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture managing temporary SQLite database files
pub struct TestFixture {
    pub temp_dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a database file and run the given SQL batch against it
    pub fn create_db(&self, name: &str, sql: &str) -> PathBuf {
        let path = self.root().join(name);
        let conn = Connection::open(&path).expect("failed to open database");
        conn.execute_batch(sql).expect("failed to set up database");
        path
    }

    /// Create a database with a simple keyed table populated from (id, name) pairs
    pub fn create_keyed_db(&self, name: &str, rows: &[(i64, &str)]) -> PathBuf {
        let mut sql = String::from(
            "CREATE TABLE items (id INTEGER PRIMARY KEY, name TEXT);\n",
        );
        for (id, value) in rows {
            sql.push_str(&format!(
                "INSERT INTO items VALUES ({}, '{}');\n",
                id,
                value.replace('\'', "''")
            ));
        }
        self.create_db(name, &sql)
    }
}
