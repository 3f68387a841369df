// src/services/spreadsheet.rs

use std::io::Cursor;

use thiserror::Error;
use umya_spreadsheet::CellRawValue;

use crate::models::cell::Cell;

/// Errors raised while reading an uploaded workbook.
#[derive(Debug, Error)]
pub enum SpreadsheetError {
    #[error("failed to read spreadsheet: {0}")]
    Read(String),

    #[error("spreadsheet contains no worksheets")]
    NoWorksheet,
}

/// Columns read for every row after the first: question, answer, accept.
const DATA_COLUMNS: u32 = 3;

/// Reads the first worksheet of an `.xlsx` file into a row matrix.
///
/// The first row spans the sheet's used width so header detection sees every
/// label. Later rows are cut to columns A..C and dropped when blank, so the
/// result grows with the filled rows rather than the sheet's dimensions.
/// Cells that were never written come back as [`Cell::Missing`].
pub fn read_rows(data: &[u8]) -> Result<Vec<Vec<Cell>>, SpreadsheetError> {
    let book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(data), true)
        .map_err(|e| SpreadsheetError::Read(e.to_string()))?;

    let sheet = book
        .get_sheet_collection()
        .first()
        .ok_or(SpreadsheetError::NoWorksheet)?;

    let (max_col, max_row) = sheet.get_highest_column_and_row();
    tracing::debug!(sheet = %sheet.get_name(), max_col, max_row, "Reading worksheet");

    if max_row == 0 {
        return Ok(Vec::new());
    }

    // umya-spreadsheet coordinates are (column, row), both 1-indexed
    let read_row = |row: u32, width: u32| -> Vec<Cell> {
        (1..=width)
            .map(|col| match sheet.get_cell((col, row)) {
                Some(cell) => to_cell(cell),
                None => Cell::Missing,
            })
            .collect()
    };

    let mut rows = vec![read_row(1, max_col)];
    rows.extend(
        (2..=max_row)
            .map(|row| read_row(row, max_col.min(DATA_COLUMNS)))
            .filter(|cells| !cells.iter().all(Cell::is_blank)),
    );

    Ok(rows)
}

fn to_cell(cell: &umya_spreadsheet::Cell) -> Cell {
    match cell.get_raw_value() {
        CellRawValue::Numeric(n) => Cell::Number(*n),
        CellRawValue::Empty => Cell::Missing,
        _ => Cell::Text(cell.get_value().to_string()),
    }
}
