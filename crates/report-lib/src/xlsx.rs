//! Spreadsheet output

use crate::report::{Cell, Table};
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet, XlsxError};
use std::path::Path;

/// Header fill for formatted sheets
pub const HEADER_FILL: u32 = 0xC0C0C0;

/// How a sheet is dressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetStyle {
    /// Bold header, nothing else
    Plain,
    /// Bold grey header, thin borders on every cell, fitted column widths
    Formatted,
}

/// Write a single-sheet workbook to `path`
pub fn write_table(table: &Table, path: &Path, style: SheetStyle) -> Result<(), XlsxError> {
    let mut workbook = build_workbook(table, style)?;
    workbook.save(path)
}

fn build_workbook(table: &Table, style: SheetStyle) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&table.sheet_name)?;

    let (header, body) = match style {
        SheetStyle::Plain => (Format::new().set_bold(), Format::new()),
        SheetStyle::Formatted => (
            Format::new()
                .set_bold()
                .set_background_color(Color::RGB(HEADER_FILL))
                .set_border(FormatBorder::Thin),
            Format::new().set_border(FormatBorder::Thin),
        ),
    };

    for (col, name) in table.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, name, &header)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let row_num = row_idx as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            write_cell(worksheet, row_num, col as u16, cell, &body, style)?;
        }
    }

    if style == SheetStyle::Formatted {
        for (col, width) in table.column_widths().into_iter().enumerate() {
            worksheet.set_column_width(col as u16, width as f64)?;
        }
    }

    Ok(workbook)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    format: &Format,
    style: SheetStyle,
) -> Result<(), XlsxError> {
    match cell {
        Cell::Text(s) => {
            worksheet.write_string_with_format(row, col, s, format)?;
        }
        Cell::Count(n) => {
            worksheet.write_number_with_format(row, col, *n as f64, format)?;
        }
        // Blank cells only need writing when they carry a border.
        Cell::Blank if style == SheetStyle::Formatted => {
            worksheet.write_blank(row, col, format)?;
        }
        Cell::Blank => {}
    }
    Ok(())
}
