//! Excel exporter implementation - Table → .xlsx

use crate::error::{IdscanError, IdscanResult};
use crate::types::{CellValue, Table};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::{Builder, NamedTempFile};
use tracing::debug;

/// Worksheet name used for exported tables
pub const SHEET_NAME: &str = "Sheet1";

const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Writes a [`Table`] to a single-sheet workbook
pub struct ExcelExporter<'a> {
    table: &'a Table,
}

impl<'a> ExcelExporter<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self { table }
    }

    /// Export the table to `output_path`.
    ///
    /// The workbook is serialized in memory, written to a temp file beside
    /// the destination and renamed into place, so the destination is either
    /// the complete workbook or left as it was. An existing destination keeps
    /// its permissions; a new one gets the usual umask-governed mode.
    pub fn export(&self, output_path: &Path) -> IdscanResult<()> {
        let buffer = self.to_buffer()?;

        let dir = match output_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = Self::temp_file_in(dir)?;
        if let Ok(existing) = fs::metadata(output_path) {
            temp.as_file().set_permissions(existing.permissions())?;
        }
        temp.write_all(&buffer)?;
        temp.as_file().sync_all()?;
        temp.persist(output_path).map_err(|e| IdscanError::Io(e.error))?;

        debug!(
            path = %output_path.display(),
            bytes = buffer.len(),
            "saved workbook"
        );
        Ok(())
    }

    /// Temp file beside the destination. Unix defaults to 0600 for temp
    /// files; ask for 0666 so the umask decides, as for any new file.
    fn temp_file_in(dir: &Path) -> IdscanResult<NamedTempFile> {
        let mut builder = Builder::new();
        builder.prefix(".idscan-").suffix(".xlsx");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }

        Ok(builder.tempfile_in(dir)?)
    }

    /// Serialize the workbook to bytes
    pub fn to_buffer(&self) -> IdscanResult<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(SHEET_NAME)
            .map_err(|e| IdscanError::Export(format!("Failed to set worksheet name: {}", e)))?;

        self.write_table(worksheet)?;

        workbook
            .save_to_buffer()
            .map_err(|e| IdscanError::Export(format!("Failed to build Excel file: {}", e)))
    }

    fn write_table(&self, worksheet: &mut Worksheet) -> IdscanResult<()> {
        // Header row (row 0)
        for (col_idx, name) in self.table.columns().iter().enumerate() {
            worksheet
                .write_string(0, Self::col(col_idx)?, name)
                .map_err(|e| IdscanError::Export(format!("Failed to write header: {}", e)))?;
        }

        let datetime = Format::new().set_num_format(DATETIME_FORMAT);

        // Data rows (starting at row 1)
        for (row_idx, row) in self.table.rows().iter().enumerate() {
            let excel_row = u32::try_from(row_idx + 1)
                .map_err(|_| IdscanError::Export("Too many rows for a worksheet".to_string()))?;

            for (col_idx, cell) in row.iter().enumerate() {
                Self::write_cell(worksheet, excel_row, Self::col(col_idx)?, cell, &datetime)?;
            }
        }

        Ok(())
    }

    /// Write a single cell based on its type; empty cells are left unwritten
    fn write_cell(
        worksheet: &mut Worksheet,
        row: u32,
        col: u16,
        cell: &CellValue,
        datetime: &Format,
    ) -> IdscanResult<()> {
        let result = match cell {
            CellValue::Empty => return Ok(()),
            CellValue::Text(text) => worksheet.write_string(row, col, text),
            CellValue::Number(n) => worksheet.write_number(row, col, *n),
            CellValue::Boolean(b) => worksheet.write_boolean(row, col, *b),
            CellValue::DateTime(serial) => {
                worksheet.write_number_with_format(row, col, *serial, datetime)
            }
        };
        result
            .map(|_| ())
            .map_err(|e| IdscanError::Export(format!("Failed to write cell ({}, {}): {}", row, col, e)))
    }

    fn col(idx: usize) -> IdscanResult<u16> {
        u16::try_from(idx)
            .map_err(|_| IdscanError::Export("Too many columns for a worksheet".to_string()))
    }
}
