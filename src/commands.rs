//! Command implementations for the sqlitediff CLI

use crate::cli::{Commands, OutputFormat};
use crate::database::{self, Database};
use crate::diff::{diff_snapshots, DiffOptions};
use crate::error::{Result, SqliteDiffError};
use crate::output::PrettyPrinter;
use std::path::Path;

/// Execute a command
pub fn execute_command(command: Commands) -> Result<()> {
    match command {
        Commands::Tables { database, format } => tables_command(&database, &format),
        Commands::Diff {
            left,
            right,
            table,
            changed_only,
            format,
        } => diff_command(&left, &right, table.as_deref(), changed_only, &format),
    }
}

/// List tables and their inferred primary keys
fn tables_command(database: &Path, format: &str) -> Result<()> {
    let format = OutputFormat::parse(format).map_err(SqliteDiffError::invalid_input)?;
    let db = Database::open(database)?;
    let tables = db.list_tables()?;

    match format {
        OutputFormat::Pretty => PrettyPrinter::print_table_list(&tables),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tables)?),
    }
    Ok(())
}

/// Compare two databases: a single table in full, or an overview of all tables
fn diff_command(
    left: &Path,
    right: &Path,
    table: Option<&str>,
    changed_only: bool,
    format: &str,
) -> Result<()> {
    let format = OutputFormat::parse(format).map_err(SqliteDiffError::invalid_input)?;
    let left_db = Database::open(left)?;
    let right_db = Database::open(right)?;

    match table {
        Some(table) => diff_table(&left_db, &right_db, table, changed_only, format),
        None => diff_overview(&left_db, &right_db, format),
    }
}

fn diff_table(
    left_db: &Database,
    right_db: &Database,
    table: &str,
    changed_only: bool,
    format: OutputFormat,
) -> Result<()> {
    log::info!("Diffing table '{}'", table);

    // load_table refuses tables without a usable single-column key, so the
    // aligner never runs for them
    let left_snapshot = left_db.load_table(table)?;
    let right_snapshot = right_db.load_table(table)?;

    if left_snapshot.primary_key != right_snapshot.primary_key {
        return Err(SqliteDiffError::invalid_input(format!(
            "Primary key mismatch for table '{}': '{}' vs '{}'",
            table, left_snapshot.primary_key, right_snapshot.primary_key
        )));
    }

    let options = DiffOptions { changed_only };
    let diff = diff_snapshots(left_snapshot, right_snapshot, options)?;

    match format {
        OutputFormat::Pretty => {
            PrettyPrinter::print_grid(&format!("--- {}", left_db.path().display()), &diff.left);
            println!();
            PrettyPrinter::print_grid(&format!("+++ {}", right_db.path().display()), &diff.right);
            if diff.is_unchanged() {
                println!();
                println!("Table '{}' is identical in both databases.", table);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&diff)?),
    }
    Ok(())
}

fn diff_overview(left_db: &Database, right_db: &Database, format: OutputFormat) -> Result<()> {
    let comparisons = database::compare_tables(left_db, right_db)?;

    match format {
        OutputFormat::Pretty => PrettyPrinter::print_table_comparisons(&comparisons),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&comparisons)?),
    }
    Ok(())
}
