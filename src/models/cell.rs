// src/models/cell.rs

/// A single spreadsheet cell as seen by the converter.
///
/// Spreadsheet readers hand back text, numbers, or nothing at all; every
/// consumer goes through [`Cell::normalized`] so the three cases are treated
/// the same way everywhere.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Missing,
}

impl Cell {
    /// Stringifies and trims the cell. Missing cells become an empty string.
    pub fn normalized(&self) -> String {
        match self {
            Cell::Text(text) => text.trim().to_string(),
            // f64's Display drops the trailing ".0", matching how sheets show integers.
            Cell::Number(n) => n.to_string(),
            Cell::Missing => String::new(),
        }
    }

    /// True when the cell normalizes to an empty string.
    pub fn is_blank(&self) -> bool {
        self.normalized().is_empty()
    }

    /// Returns the raw text when the cell holds a string value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}
