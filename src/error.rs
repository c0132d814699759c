//! Error types for sqlitediff operations

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SqliteDiffError>;

#[derive(Error, Debug)]
pub enum SqliteDiffError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Database not found: {path}")]
    DatabaseNotFound { path: PathBuf },

    #[error("Table not found: {table}")]
    TableNotFound { table: String },

    #[error("Table '{table}' has no usable single-column primary key")]
    MissingPrimaryKey { table: String },

    #[error("Duplicate primary key value '{key}' in column '{column}'")]
    DuplicateKey { column: String, key: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl SqliteDiffError {
    pub fn table_not_found(table: impl Into<String>) -> Self {
        Self::TableNotFound {
            table: table.into(),
        }
    }

    pub fn missing_primary_key(table: impl Into<String>) -> Self {
        Self::MissingPrimaryKey {
            table: table.into(),
        }
    }

    pub fn duplicate_key(column: impl Into<String>, key: impl Into<String>) -> Self {
        Self::DuplicateKey {
            column: column.into(),
            key: key.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }
}
