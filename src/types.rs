use crate::error::{IdscanError, IdscanResult};
use chrono::{Duration, NaiveDate};
use std::borrow::Cow;
use std::fmt;

//==============================================================================
// Cell Values
//==============================================================================

/// A single spreadsheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Missing/blank cell (distinct from an empty string)
    Empty,
    Text(String),
    Number(f64),
    Boolean(bool),
    /// Excel date/time serial (1900 date system)
    DateTime(f64),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Textual form of the cell, `None` only for [`CellValue::Empty`].
    ///
    /// Total over every other variant: numbers, booleans and dates always
    /// render to something.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => Some(Cow::Borrowed(s.as_str())),
            CellValue::Number(n) => Some(Cow::Owned(format_number(*n))),
            CellValue::Boolean(b) => Some(Cow::Borrowed(if *b { "TRUE" } else { "FALSE" })),
            CellValue::DateTime(serial) => Some(Cow::Owned(format_excel_datetime(*serial))),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_text() {
            Some(text) => f.write_str(&text),
            None => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<Option<String>> for CellValue {
    fn from(value: Option<String>) -> Self {
        value.map(CellValue::Text).unwrap_or(CellValue::Empty)
    }
}

/// Format a number the way a spreadsheet shows it: integral values drop the
/// fractional part (202113456.0 → "202113456")
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Render an Excel serial as `YYYY-MM-DD HH:MM:SS`, or as the bare serial
/// when it falls outside the representable range
pub fn format_excel_datetime(serial: f64) -> String {
    // Serial 0 is 1899-12-30 once the 1900 leap-year bug is accounted for
    const MAX_SERIAL: f64 = 2_958_465.999_999; // 9999-12-31 23:59:59

    if !serial.is_finite() || !(0.0..=MAX_SERIAL).contains(&serial) {
        return format_number(serial);
    }

    let millis = (serial * 86_400_000.0).round() as i64;
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|epoch| epoch.and_hms_opt(0, 0, 0))
        .and_then(|epoch| epoch.checked_add_signed(Duration::milliseconds(millis)))
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| format_number(serial))
}

//==============================================================================
// Tables
//==============================================================================

/// Ordered rows sharing one ordered column set
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row; its width must match the column count
    pub fn push_row(&mut self, row: Vec<CellValue>) -> IdscanResult<()> {
        if row.len() != self.columns.len() {
            return Err(IdscanError::Import(format!(
                "Row {} has {} cells, expected {}",
                self.rows.len() + 1,
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Index of `name`, or a [`IdscanError::MissingColumn`] naming what exists
    pub fn require_column(&self, name: &str) -> IdscanResult<usize> {
        self.column_index(name)
            .ok_or_else(|| IdscanError::MissingColumn {
                column: name.to_string(),
                available: self.columns.clone(),
            })
    }

    /// Cell at (`row`, `column`)
    pub fn get(&self, row: usize, column: &str) -> Option<&CellValue> {
        let col = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// All cells of one column, in row order
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &CellValue> + '_> {
        let col = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[col]))
    }
}
