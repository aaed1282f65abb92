//! Core extraction logic
//!
//! - [`IdExtractor`]: one cell in, at most one identifier out
//! - [`append_identifiers`]: map the extractor over a column and append the
//!   results as a new column

pub mod extractor;
pub mod transform;

pub use extractor::{IdExtractor, IDENTIFIER_PATTERN};
pub use transform::{append_identifiers, identifiers, ExtractionSummary, Identifiers};
