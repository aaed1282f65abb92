//! Excel importer implementation - workbook → Table

use crate::error::{IdscanError, IdscanResult};
use crate::types::{CellValue, Table};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads one worksheet into a [`Table`] (first row is the header)
pub struct ExcelImporter {
    path: PathBuf,
    sheet: Option<String>,
}

impl ExcelImporter {
    /// Create a new importer reading the first worksheet
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            sheet: None,
        }
    }

    /// Read the named worksheet instead of the first one
    pub fn with_sheet(mut self, sheet: Option<String>) -> Self {
        self.sheet = sheet;
        self
    }

    /// Import the selected worksheet
    pub fn import(&self) -> IdscanResult<Table> {
        let mut workbook = open_workbook_auto(&self.path).map_err(|e| match e {
            calamine::Error::Io(io) => IdscanError::Io(io),
            other => IdscanError::Import(format!(
                "Failed to open {}: {}",
                self.path.display(),
                other
            )),
        })?;

        let sheet_names = workbook.sheet_names();
        let sheet_name = match &self.sheet {
            Some(name) if sheet_names.contains(name) => name.clone(),
            Some(name) => {
                return Err(IdscanError::Config(format!(
                    "Worksheet '{}' not found (available: {})",
                    name,
                    sheet_names.join(", ")
                )))
            }
            None => sheet_names.first().cloned().ok_or_else(|| {
                IdscanError::Import(format!("{} has no worksheets", self.path.display()))
            })?,
        };

        let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
            IdscanError::Import(format!("Failed to read worksheet '{}': {}", sheet_name, e))
        })?;

        let table = Self::range_to_table(&range)?;
        debug!(
            path = %self.path.display(),
            sheet = %sheet_name,
            columns = table.columns().len(),
            rows = table.row_count(),
            "imported worksheet"
        );
        Ok(table)
    }

    /// Convert a used range to a table: header row, then data rows.
    ///
    /// The used range starts at the first non-empty cell; columns left of it
    /// are kept as blank columns so positions match the sheet.
    fn range_to_table(range: &Range<Data>) -> IdscanResult<Table> {
        let mut rows = range.rows();
        let header = match rows.next() {
            Some(header) => header,
            None => return Ok(Table::default()),
        };
        let first_col = range.start().map_or(0, |(_, col)| col as usize);

        let mut table = Table::new(Self::header_names(header, first_col));
        for row in rows {
            let cells = std::iter::repeat(CellValue::Empty)
                .take(first_col)
                .chain(row.iter().map(Self::convert_cell))
                .collect();
            table.push_row(cells)?;
        }
        Ok(table)
    }

    /// Header names for a header row whose first cell sits in column
    /// `first_col`: blanks (including the columns before it) become
    /// `Unnamed: N` by absolute column, repeats get `.1`, `.2`, ...
    fn header_names(header: &[Data], first_col: usize) -> Vec<String> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut names = Vec::with_capacity(first_col + header.len());

        let cells = std::iter::repeat(CellValue::Empty)
            .take(first_col)
            .chain(header.iter().map(Self::convert_cell));

        for (idx, cell) in cells.enumerate() {
            let base = match cell.as_text() {
                Some(text) if !text.trim().is_empty() => text.into_owned(),
                _ => format!("Unnamed: {}", idx),
            };

            let mut name = base.clone();
            let mut suffix = 1;
            while seen.contains(&name) {
                name = format!("{}.{}", base, suffix);
                suffix += 1;
            }
            seen.insert(name.clone());
            names.push(name);
        }

        names
    }

    /// Convert a calamine cell to a [`CellValue`]
    fn convert_cell(cell: &Data) -> CellValue {
        match cell {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Boolean(*b),
            Data::DateTime(dt) if dt.is_duration() => CellValue::Number(dt.as_f64()),
            Data::DateTime(dt) => CellValue::DateTime(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(e) => CellValue::Text(e.to_string()),
        }
    }
}
