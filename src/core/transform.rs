//! Column transform: append extracted identifiers to a table

use super::extractor::IdExtractor;
use crate::config::ExtractConfig;
use crate::error::{IdscanError, IdscanResult};
use crate::types::{CellValue, Table};
use std::iter::FusedIterator;
use std::slice;
use tracing::debug;

/// Lazy, per-row identifiers for one column.
///
/// Cloning restarts from the clone point without touching the table.
#[derive(Debug, Clone)]
pub struct Identifiers<'a> {
    extractor: &'a IdExtractor,
    rows: slice::Iter<'a, Vec<CellValue>>,
    column: usize,
}

impl Iterator for Identifiers<'_> {
    type Item = Option<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        Some(self.extractor.extract(&row[self.column]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl ExactSizeIterator for Identifiers<'_> {}

impl FusedIterator for Identifiers<'_> {}

/// Identifiers for every row of `column`, in row order
pub fn identifiers<'a>(
    table: &'a Table,
    column: &str,
    extractor: &'a IdExtractor,
) -> IdscanResult<Identifiers<'a>> {
    let column = table.require_column(column)?;
    Ok(Identifiers {
        extractor,
        rows: table.rows().iter(),
        column,
    })
}

/// Build a new table: every input column, then `config.output_column`
/// holding each row's identifier (or an empty cell when none was found)
pub fn append_identifiers(
    table: &Table,
    config: &ExtractConfig,
    extractor: &IdExtractor,
) -> IdscanResult<Table> {
    if table.has_column(&config.output_column) {
        return Err(IdscanError::Config(format!(
            "Output column '{}' already exists",
            config.output_column
        )));
    }

    let ids = identifiers(table, &config.source_column, extractor)?;

    let mut columns = table.columns().to_vec();
    columns.push(config.output_column.clone());
    let mut output = Table::new(columns);

    for (row, id) in table.rows().iter().zip(ids) {
        let mut cells = Vec::with_capacity(row.len() + 1);
        cells.extend(row.iter().cloned());
        cells.push(CellValue::from(id));
        output.push_row(cells)?;
    }

    debug!(
        rows = output.row_count(),
        source = %config.source_column,
        output = %config.output_column,
        "appended identifier column"
    );

    Ok(output)
}

/// Counts of matched and unmatched rows in an output column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtractionSummary {
    pub rows: usize,
    pub matched: usize,
}

impl ExtractionSummary {
    pub fn from_column(table: &Table, column: &str) -> IdscanResult<Self> {
        let idx = table.require_column(column)?;
        let matched = table
            .rows()
            .iter()
            .filter(|row| !row[idx].is_empty())
            .count();
        Ok(Self {
            rows: table.row_count(),
            matched,
        })
    }

    pub fn unmatched(&self) -> usize {
        self.rows - self.matched
    }
}
