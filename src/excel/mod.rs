//! Excel import/export
//!
//! - Import: workbook (.xlsx, .xlsm, .xls, .ods) → [`Table`](crate::types::Table)
//! - Export: [`Table`](crate::types::Table) → single-sheet .xlsx, written atomically

mod exporter;
mod importer;

pub use exporter::{ExcelExporter, SHEET_NAME};
pub use importer::ExcelImporter;
