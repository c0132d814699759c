//! Terminal output formatting

use crate::database::{TableComparison, TableInfo, TableState};
use crate::grid::{visualize_newlines, ColumnWidth, Grid};
use crate::snapshot::{CellStatus, Row};
use crate::STATUS_COLUMN;

const MAX_COLUMN_WIDTH: usize = 40;

/// Pretty printer for sqlitediff output
pub struct PrettyPrinter;

impl PrettyPrinter {
    /// Print the table list of one database
    pub fn print_table_list(tables: &[TableInfo]) {
        if tables.is_empty() {
            println!("No tables found.");
            return;
        }

        println!("Tables:");
        for (i, table) in tables.iter().enumerate() {
            let prefix = if i == tables.len() - 1 { "└─" } else { "├─" };
            match &table.primary_key {
                Some(pk) => println!("{} {} (primary key: {})", prefix, table.name, pk),
                None => println!("{} {} (no usable primary key)", prefix, table.name),
            }
        }
    }

    /// Print the per-table comparison overview of two databases
    pub fn print_table_comparisons(comparisons: &[TableComparison]) {
        if comparisons.is_empty() {
            println!("No tables found in either database.");
            return;
        }

        println!("Tables:");
        for (i, comparison) in comparisons.iter().enumerate() {
            let prefix = if i == comparisons.len() - 1 { "└─" } else { "├─" };
            let state = match comparison.state {
                TableState::Same => "unchanged",
                TableState::Different => "DIFFERENT",
                TableState::LeftOnly => "only in first database",
                TableState::RightOnly => "only in second database",
            };
            println!("{} {}: {}", prefix, comparison.name, state);
        }
    }

    /// Render one annotated grid as aligned text columns.
    ///
    /// Changed cells are wrapped in brackets; multi-line values are shown with
    /// their line-break glyphs, one terminal line per value line.
    pub fn print_grid(label: &str, grid: &Grid) {
        println!("{}", label);

        let widths: Vec<usize> = grid
            .columns
            .iter()
            .map(|col| match col.width {
                ColumnWidth::Fixed(w) => w as usize,
                ColumnWidth::Fill => {
                    let content = grid
                        .rows
                        .iter()
                        .map(|row| widest_line(&cell_text(row, &col.binding)))
                        .max()
                        .unwrap_or(0);
                    content.max(header_width(&col.header)).min(MAX_COLUMN_WIDTH)
                }
            })
            .collect();

        let header: Vec<String> = grid
            .columns
            .iter()
            .zip(&widths)
            .map(|(col, &w)| pad(&col.header, w))
            .collect();
        println!("{}", header.join("  "));
        println!(
            "{}",
            widths
                .iter()
                .map(|&w| "-".repeat(w))
                .collect::<Vec<_>>()
                .join("  ")
        );

        for row in &grid.rows {
            let cells: Vec<Vec<String>> = grid
                .columns
                .iter()
                .map(|col| {
                    cell_text(row, &col.binding)
                        .split('\n')
                        .map(str::to_string)
                        .collect()
                })
                .collect();
            let height = cells.iter().map(Vec::len).max().unwrap_or(1);

            for line in 0..height {
                let rendered: Vec<String> = cells
                    .iter()
                    .zip(&widths)
                    .map(|(lines, &w)| pad(lines.get(line).map(String::as_str).unwrap_or(""), w))
                    .collect();
                println!("{}", rendered.join("  "));
            }
        }
    }
}

/// Display text of one cell, including the synthetic status binding
fn cell_text(row: &Row, binding: &str) -> String {
    if binding == STATUS_COLUMN {
        return row.status.abbreviation().to_string();
    }
    match row.get(binding) {
        Some(cell) => {
            let text = visualize_newlines(&cell.value.canonical_string());
            if cell.status == CellStatus::CellChanged {
                format!("[{}]", text)
            } else {
                text
            }
        }
        None => String::new(),
    }
}

fn header_width(header: &str) -> usize {
    header.chars().count()
}

fn widest_line(text: &str) -> usize {
    text.split('\n').map(|l| l.chars().count()).max().unwrap_or(0)
}

fn pad(text: &str, width: usize) -> String {
    let truncated: String = text.chars().take(width).collect();
    format!("{:<width$}", truncated, width = width)
}
