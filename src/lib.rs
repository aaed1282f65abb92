//! idscan - spreadsheet identifier extractor
//!
//! Loads a worksheet, pulls the first `202xxxxxx` identifier out of one
//! column, appends the results as a new column and saves a new workbook.
//!
//! # Example
//!
//! ```no_run
//! use royalbit_idscan::config::ExtractConfig;
//! use royalbit_idscan::core::{append_identifiers, IdExtractor};
//! use royalbit_idscan::excel::{ExcelExporter, ExcelImporter};
//!
//! let config = ExtractConfig::new("submissions.xlsx");
//! let table = ExcelImporter::new(&config.source_path).import()?;
//!
//! let extractor = IdExtractor::new()?;
//! let output = append_identifiers(&table, &config, &extractor)?;
//!
//! ExcelExporter::new(&output).export(&config.output_path)?;
//! # Ok::<(), royalbit_idscan::error::IdscanError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod types;

// Re-export commonly used types
pub use config::ExtractConfig;
pub use error::{IdscanError, IdscanResult};
pub use types::{CellValue, Table};
