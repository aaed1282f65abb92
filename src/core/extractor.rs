//! Identifier extraction from single cells

use crate::error::{IdscanError, IdscanResult};
use crate::types::CellValue;
use regex::Regex;

/// Nine ASCII digits starting with "202", not touching other word characters
pub const IDENTIFIER_PATTERN: &str = r"\b202[0-9]{6}\b";

/// Pulls the first identifier out of a cell
#[derive(Debug, Clone)]
pub struct IdExtractor {
    pattern: Regex,
}

impl IdExtractor {
    pub fn new() -> IdscanResult<Self> {
        let pattern = Regex::new(IDENTIFIER_PATTERN)
            .map_err(|e| IdscanError::Pattern(format!("Regex error: {}", e)))?;
        Ok(Self { pattern })
    }

    /// Extract the leftmost identifier from a cell.
    ///
    /// Empty cells yield `None` without matching. Every other cell is
    /// rendered to text first, so a numeric `202113456` matches just like the
    /// string `"202113456"`.
    pub fn extract(&self, cell: &CellValue) -> Option<String> {
        let text = cell.as_text()?;
        self.extract_text(&text)
    }

    /// Extract the leftmost identifier from plain text
    pub fn extract_text(&self, text: &str) -> Option<String> {
        self.pattern.find(text).map(|m| m.as_str().to_string())
    }
}
