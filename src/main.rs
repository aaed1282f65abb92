use clap::Parser;
use royalbit_idscan::cli;
use royalbit_idscan::config::ExtractConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "idscan")]
#[command(about = "Extract 9-digit 202xxxxxx identifiers from a spreadsheet column")]
#[command(long_about = "idscan - Spreadsheet identifier extractor

Reads a worksheet, scans one column for the first 9-digit identifier
starting with 202 (e.g. 202113456), and writes a copy of the sheet with
the identifiers appended as a new column. Rows without an identifier get
an empty cell.

MATCHING:
  Pattern: \\b202[0-9]{6}\\b (word-boundary delimited)
  'ID 202113456 submitted' → 202113456
  '20211345'               → (none, only 8 digits)
  '2021134567'             → (none, 10 digits)
  Numeric cells are matched on their displayed value.

CONFIG FILE (--config):
  source_path: submissions.xlsx
  output_path: submissions_with_ids.xlsx
  source_column: Data
  output_column: Student_ID
  sheet: Responses
  preview_rows: 5

  Command-line flags override values from the file.

EXAMPLES:
  idscan submissions.xlsx
  idscan submissions.xlsx -o with_ids.xlsx -c Comments -t ID
  idscan submissions.xlsx --sheet Responses --dry-run")]
#[command(version)]
struct Cli {
    /// Workbook to read (.xlsx, .xlsm, .xls, .ods)
    input: Option<PathBuf>,

    /// Output workbook path (.xlsx) [default: output_with_student_ids.xlsx]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Column to scan for identifiers [default: Data]
    #[arg(short = 'c', long)]
    column: Option<String>,

    /// Name of the new identifier column [default: Student_ID]
    #[arg(short = 't', long)]
    target: Option<String>,

    /// Worksheet to read [default: first sheet]
    #[arg(short, long)]
    sheet: Option<String>,

    /// Rows to show in the preview [default: 5]
    #[arg(short, long)]
    preview: Option<usize>,

    /// YAML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Extract and preview without writing the output file
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Show verbose steps and debug logs
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Merge flags over the config file (or defaults)
    fn into_config(self) -> anyhow::Result<(ExtractConfig, bool, bool)> {
        let mut config = match &self.config {
            Some(path) => ExtractConfig::from_yaml_file(path)?,
            None => ExtractConfig::default(),
        };

        if let Some(input) = self.input {
            config.source_path = input;
        }
        if let Some(output) = self.output {
            config.output_path = output;
        }
        if let Some(column) = self.column {
            config.source_column = column;
        }
        if let Some(target) = self.target {
            config.output_column = target;
        }
        if let Some(sheet) = self.sheet {
            config.sheet = Some(sheet);
        }
        if let Some(preview) = self.preview {
            config.preview_rows = preview;
        }

        Ok((config, self.dry_run, self.verbose))
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "idscan=debug,royalbit_idscan=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (config, dry_run, verbose) = cli.into_config()?;
    cli::extract(config, dry_run, verbose)?;
    Ok(())
}
