use crate::config::ExtractConfig;
use crate::core::{append_identifiers, ExtractionSummary, IdExtractor};
use crate::error::IdscanResult;
use crate::excel::{ExcelExporter, ExcelImporter};
use crate::types::{CellValue, Table};
use colored::Colorize;
use tracing::info;

/// Widest source text shown in the preview before truncating
const PREVIEW_TEXT_WIDTH: usize = 48;

/// Execute one extraction run: load, append identifiers, save
pub fn extract(
    config: ExtractConfig,
    dry_run: bool,
    verbose: bool,
) -> IdscanResult<ExtractionSummary> {
    config.validate()?;

    println!("{}", "🔎 idscan - Identifier Extraction".bold().green());
    println!("   Input:  {}", config.source_path.display());
    println!("   Output: {}", config.output_path.display());
    println!(
        "   Column: {} → {}\n",
        config.source_column.bright_blue().bold(),
        config.output_column.bright_blue().bold()
    );

    if verbose {
        println!("{}", "📖 Reading workbook...".cyan());
    }

    let table = ExcelImporter::new(&config.source_path)
        .with_sheet(config.sheet.clone())
        .import()?;

    if verbose {
        println!(
            "   Found {} columns, {} rows\n",
            table.columns().len(),
            table.row_count()
        );
        println!("{}", "🧮 Extracting identifiers...".cyan());
    }

    let extractor = IdExtractor::new()?;
    let output = append_identifiers(&table, &config, &extractor)?;
    let summary = ExtractionSummary::from_column(&output, &config.output_column)?;

    info!(
        rows = summary.rows,
        matched = summary.matched,
        "extraction finished"
    );

    if dry_run {
        println!("{}", "📋 Dry run complete - no changes written".yellow());
    } else {
        if verbose {
            println!("{}", "📊 Writing workbook...".cyan());
        }
        ExcelExporter::new(&output).export(&config.output_path)?;
        println!("{}", "✅ Processing complete!".bold().green());
        println!("   File saved as: {}", config.output_path.display());
    }

    println!(
        "   Matched: {} of {} rows ({} without an identifier)\n",
        summary.matched.to_string().green(),
        summary.rows,
        summary.unmatched().to_string().yellow()
    );

    print_preview(&output, &config);

    Ok(summary)
}

/// Print source/extracted pairs for the first few rows
fn print_preview(output: &Table, config: &ExtractConfig) {
    if config.preview_rows == 0 || output.row_count() == 0 {
        return;
    }

    println!("{}", "First few rows:".bold().cyan());
    for line in preview_lines(output, config) {
        println!("{}", line);
    }
    println!();
}

/// Plain-text preview rows: index, source text, extracted identifier
fn preview_lines(output: &Table, config: &ExtractConfig) -> Vec<String> {
    let (Some(source), Some(extracted)) = (
        output.column_index(&config.source_column),
        output.column_index(&config.output_column),
    ) else {
        return Vec::new();
    };

    let rows = &output.rows()[..config.preview_rows.min(output.row_count())];
    let cells: Vec<(String, String)> = rows
        .iter()
        .map(|row| (preview_cell(&row[source]), preview_cell(&row[extracted])))
        .collect();

    let width = cells
        .iter()
        .map(|(text, _)| text.chars().count())
        .chain(std::iter::once(config.source_column.chars().count()))
        .max()
        .unwrap_or(0);

    let mut lines = Vec::with_capacity(cells.len() + 1);
    lines.push(format!(
        "   {:>4}  {:<width$}  {}",
        "",
        config.source_column,
        config.output_column
    ));
    for (idx, (text, id)) in cells.iter().enumerate() {
        lines.push(format!("   {:>4}  {:<width$}  {}", idx, text, id));
    }
    lines
}

/// One cell for the preview: empty shown as `None`, newlines flattened,
/// long text truncated
fn preview_cell(cell: &CellValue) -> String {
    let text = match cell.as_text() {
        Some(text) => text.replace(['\r', '\n'], " "),
        None => return "None".to_string(),
    };

    if text.chars().count() > PREVIEW_TEXT_WIDTH {
        let cut: String = text.chars().take(PREVIEW_TEXT_WIDTH - 3).collect();
        format!("{}...", cut)
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IdscanError;
    use pretty_assertions::assert_eq;
    use rust_xlsxwriter::Workbook;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_input(path: &Path) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Name").unwrap();
        sheet.write_string(0, 1, "Data").unwrap();
        sheet.write_string(1, 0, "John").unwrap();
        sheet
            .write_string(1, 1, "Name: John, ID 202113456 submitted")
            .unwrap();
        sheet.write_string(2, 0, "Jane").unwrap();
        sheet.write_string(2, 1, "no id here").unwrap();
        workbook.save(path).unwrap();
    }

    fn output_table() -> Table {
        let mut table = Table::new(vec!["Data".to_string(), "Student_ID".to_string()]);
        table
            .push_row(vec!["ID 202113456".into(), "202113456".into()])
            .unwrap();
        table
            .push_row(vec!["nothing".into(), CellValue::Empty])
            .unwrap();
        table
    }

    #[test]
    fn test_preview_cell_empty() {
        assert_eq!(preview_cell(&CellValue::Empty), "None");
    }

    #[test]
    fn test_preview_cell_number() {
        assert_eq!(preview_cell(&CellValue::Number(202113456.0)), "202113456");
    }

    #[test]
    fn test_preview_cell_flattens_newlines() {
        assert_eq!(preview_cell(&"a\nb\r\nc".into()), "a b  c");
    }

    #[test]
    fn test_preview_cell_truncates() {
        let long = "x".repeat(100);
        let cell = preview_cell(&CellValue::Text(long));
        assert_eq!(cell.chars().count(), PREVIEW_TEXT_WIDTH);
        assert!(cell.ends_with("..."));
    }

    #[test]
    fn test_preview_lines() {
        let config = ExtractConfig::new("in.xlsx");
        let lines = preview_lines(&output_table(), &config);
        assert_eq!(
            lines,
            vec![
                "         Data          Student_ID".to_string(),
                "      0  ID 202113456  202113456".to_string(),
                "      1  nothing       None".to_string(),
            ]
        );
    }

    #[test]
    fn test_preview_lines_limited() {
        let mut config = ExtractConfig::new("in.xlsx");
        config.preview_rows = 1;
        let lines = preview_lines(&output_table(), &config);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_extract_writes_output() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in.xlsx");
        let output = temp_dir.path().join("out.xlsx");
        write_input(&input);

        let mut config = ExtractConfig::new(&input);
        config.output_path = output.clone();

        let summary = extract(config, false, true).unwrap();
        assert_eq!(summary, ExtractionSummary { rows: 2, matched: 1 });
        assert!(output.exists());

        let written = ExcelImporter::new(&output).import().unwrap();
        assert_eq!(written.columns(), &["Name", "Data", "Student_ID"]);
        assert_eq!(
            written.get(0, "Student_ID"),
            Some(&CellValue::Text("202113456".to_string()))
        );
        assert_eq!(written.get(1, "Student_ID"), Some(&CellValue::Empty));
    }

    #[test]
    fn test_extract_dry_run_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in.xlsx");
        let output = temp_dir.path().join("out.xlsx");
        write_input(&input);

        let mut config = ExtractConfig::new(&input);
        config.output_path = output.clone();

        let summary = extract(config, true, false).unwrap();
        assert_eq!(summary.matched, 1);
        assert!(!output.exists());
    }

    #[test]
    fn test_extract_missing_column_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in.xlsx");
        let output = temp_dir.path().join("out.xlsx");
        write_input(&input);

        let mut config = ExtractConfig::new(&input);
        config.output_path = output.clone();
        config.source_column = "Comments".to_string();

        let result = extract(config, false, false);
        assert!(matches!(result, Err(IdscanError::MissingColumn { .. })));
        assert!(!output.exists());
    }

    #[test]
    fn test_extract_nonexistent_input() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = ExtractConfig::new(temp_dir.path().join("missing.xlsx"));
        config.output_path = temp_dir.path().join("out.xlsx");

        let result = extract(config, false, false);
        assert!(result.is_err());
        assert!(!temp_dir.path().join("out.xlsx").exists());
    }

    #[test]
    fn test_extract_invalid_config() {
        let result = extract(ExtractConfig::default(), false, false);
        assert!(matches!(result, Err(IdscanError::Config(_))));
    }
}
