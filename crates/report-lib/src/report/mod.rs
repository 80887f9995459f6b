//! Report construction
//!
//! Builders first produce typed rows from a full inventory snapshot, then
//! project them into a [`Table`] whose column set depends on the data.

pub mod comparison;
pub mod summary;

pub use comparison::{ComparisonReport, ComparisonRow, ResourceStatus};
pub use summary::{Category, ClusterSummary, SummaryReport, TypeStats};

use serde::Serialize;
use std::fmt;

/// A single spreadsheet cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Count(u64),
    Blank,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Characters needed to render the cell
    pub fn display_len(&self) -> usize {
        match self {
            Cell::Text(s) => s.chars().count(),
            Cell::Count(n) => n.to_string().len(),
            Cell::Blank => 0,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Cell::Blank)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Count(n) => write!(f, "{}", n),
            Cell::Blank => Ok(()),
        }
    }
}

/// A rectangular, fully materialized sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub sheet_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(sheet_name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row; it must have one cell per column
    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Width of each column: longest header or cell text, plus 2
    pub fn column_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let longest_cell = self
                    .rows
                    .iter()
                    .map(|row| row[idx].display_len())
                    .max()
                    .unwrap_or(0);
                header.chars().count().max(longest_cell) + 2
            })
            .collect()
    }
}
