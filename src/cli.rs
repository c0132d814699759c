//! Command-line interface for sqlitediff

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sqlitediff")]
#[command(about = "Primary-key aligned diff of SQLite tables")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Log filter for this invocation: debug with `--verbose`, info otherwise
    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the tables of a database with their inferred primary keys
    Tables {
        /// Database file path
        database: PathBuf,

        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,
    },

    /// Compare two databases
    Diff {
        /// First database file path
        left: PathBuf,

        /// Second database file path
        right: PathBuf,

        /// Diff a single table instead of listing which tables differ
        #[arg(long)]
        table: Option<String>,

        /// Omit unchanged rows from the output
        #[arg(long)]
        changed_only: bool,

        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,
    },
}

/// Parse output format string
#[derive(Debug, Clone)]
pub enum OutputFormat {
    Pretty,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {}. Use 'pretty' or 'json'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert!(matches!(OutputFormat::parse("pretty"), Ok(OutputFormat::Pretty)));
        assert!(matches!(OutputFormat::parse("JSON"), Ok(OutputFormat::Json)));
        assert!(OutputFormat::parse("yaml").is_err());
    }

    #[test]
    fn test_verbose_flag_raises_log_level() {
        let cli = Cli::try_parse_from(["sqlitediff", "tables", "a.db"]).unwrap();
        assert_eq!(cli.log_level(), log::LevelFilter::Info);

        let cli = Cli::try_parse_from(["sqlitediff", "--verbose", "tables", "a.db"]).unwrap();
        assert_eq!(cli.log_level(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_cli_parses_diff_command() {
        let cli = Cli::try_parse_from([
            "sqlitediff",
            "diff",
            "a.db",
            "b.db",
            "--table",
            "users",
            "--changed-only",
        ])
        .unwrap();
        match cli.command {
            Commands::Diff {
                table, changed_only, ..
            } => {
                assert_eq!(table.as_deref(), Some("users"));
                assert!(changed_only);
            }
            _ => panic!("expected diff command"),
        }
    }
}
