//! Output formatting utilities

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use report_lib::Table;
use tabled::{builder::Builder, settings::Style};

/// Console preview format for a built report
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Log line format
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Render a report table for the console
pub fn render_table(table: &Table, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => {
            if table.rows.is_empty() {
                return Ok("No rows".yellow().to_string());
            }
            let mut builder = Builder::default();
            builder.push_record(table.columns.iter().cloned());
            for row in &table.rows {
                builder.push_record(row.iter().map(|cell| cell.to_string()));
            }
            Ok(builder.build().with(Style::rounded()).to_string())
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(table)?),
    }
}

/// Print a report table
pub fn print_table(table: &Table, format: OutputFormat) -> Result<()> {
    println!("{}", render_table(table, format)?);
    Ok(())
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
