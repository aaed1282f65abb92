//! Run configuration for one extraction pass
//!
//! A config can be built in code, loaded from a YAML file, or assembled from
//! CLI flags. Every field has a default, so a YAML file only needs the keys
//! it wants to change:
//!
//! ```yaml
//! source_path: submissions.xlsx
//! output_path: submissions_with_ids.xlsx
//! source_column: Comments
//! ```

use crate::error::{IdscanError, IdscanResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_SOURCE_COLUMN: &str = "Data";
pub const DEFAULT_OUTPUT_COLUMN: &str = "Student_ID";
pub const DEFAULT_OUTPUT_PATH: &str = "output_with_student_ids.xlsx";
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    /// Workbook to read
    pub source_path: PathBuf,
    /// Workbook to write
    pub output_path: PathBuf,
    /// Column scanned for identifiers
    pub source_column: String,
    /// Name of the appended column
    pub output_column: String,
    /// Worksheet to read (first sheet when unset)
    pub sheet: Option<String>,
    /// Rows shown in the console preview
    pub preview_rows: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::new(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            source_column: DEFAULT_SOURCE_COLUMN.to_string(),
            output_column: DEFAULT_OUTPUT_COLUMN.to_string(),
            sheet: None,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl ExtractConfig {
    pub fn new<P: AsRef<Path>>(source_path: P) -> Self {
        Self {
            source_path: source_path.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Load a config from a YAML file; missing keys keep their defaults
    pub fn from_yaml_file(path: &Path) -> IdscanResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> IdscanResult<Self> {
        // An empty file deserializes to unit, not to an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Reject configurations that cannot produce a sensible run
    pub fn validate(&self) -> IdscanResult<()> {
        if self.source_path.as_os_str().is_empty() {
            return Err(IdscanError::Config("source_path is required".to_string()));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(IdscanError::Config("output_path is required".to_string()));
        }
        if same_file(&self.source_path, &self.output_path) {
            return Err(IdscanError::Config(format!(
                "output_path must differ from source_path ({})",
                self.source_path.display()
            )));
        }
        if self.source_column.trim().is_empty() {
            return Err(IdscanError::Config("source_column is empty".to_string()));
        }
        if self.output_column.trim().is_empty() {
            return Err(IdscanError::Config("output_column is empty".to_string()));
        }
        if self.source_column == self.output_column {
            return Err(IdscanError::Config(format!(
                "output_column must differ from source_column ('{}')",
                self.source_column
            )));
        }
        Ok(())
    }
}

/// True when both paths name the same file, comparing resolved paths
/// where they can be resolved (`./in.xlsx` and `in.xlsx` are equal)
fn same_file(a: &Path, b: &Path) -> bool {
    a == b || resolve(a) == resolve(b)
}

/// Canonical form of `path`, or of its parent joined with the file name
/// when the file itself does not exist yet
fn resolve(path: &Path) -> Option<PathBuf> {
    if let Ok(canonical) = path.canonicalize() {
        return Some(canonical);
    }
    let name = path.file_name()?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    parent.canonicalize().ok().map(|dir| dir.join(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = ExtractConfig::new("input.xlsx");
        assert_eq!(config.source_path, PathBuf::from("input.xlsx"));
        assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert_eq!(config.source_column, "Data");
        assert_eq!(config.output_column, "Student_ID");
        assert_eq!(config.sheet, None);
        assert_eq!(config.preview_rows, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = ExtractConfig::from_yaml_str(
            "source_path: in.xlsx\nsource_column: Comments\nsheet: Responses\n",
        )
        .unwrap();
        assert_eq!(
            config,
            ExtractConfig {
                source_path: PathBuf::from("in.xlsx"),
                source_column: "Comments".to_string(),
                sheet: Some("Responses".to_string()),
                ..ExtractConfig::default()
            }
        );
    }

    #[test]
    fn test_from_yaml_empty() {
        let config = ExtractConfig::from_yaml_str("  \n").unwrap();
        assert_eq!(config, ExtractConfig::default());
    }

    #[test]
    fn test_from_yaml_unknown_key() {
        let result = ExtractConfig::from_yaml_str("source_colum: Data\n");
        assert!(matches!(result, Err(IdscanError::Yaml(_))));
    }

    #[test]
    fn test_validate_requires_source_path() {
        let result = ExtractConfig::default().validate();
        assert!(matches!(result, Err(IdscanError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_same_paths() {
        let mut config = ExtractConfig::new("same.xlsx");
        config.output_path = PathBuf::from("same.xlsx");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_same_file_spelled_differently() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let source = temp_dir.path().join("in.xlsx");
        std::fs::write(&source, b"x").unwrap();

        let mut config = ExtractConfig::new(&source);
        config.output_path = temp_dir.path().join(".").join("in.xlsx");
        assert!(matches!(config.validate(), Err(IdscanError::Config(_))));
    }

    #[test]
    fn test_validate_accepts_distinct_new_output() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let source = temp_dir.path().join("in.xlsx");
        std::fs::write(&source, b"x").unwrap();

        let mut config = ExtractConfig::new(&source);
        config.output_path = temp_dir.path().join(".").join("out.xlsx");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_same_columns() {
        let mut config = ExtractConfig::new("in.xlsx");
        config.output_column = "Data".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_columns() {
        let mut config = ExtractConfig::new("in.xlsx");
        config.source_column = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = ExtractConfig::new("in.xlsx");
        config.output_column = String::new();
        assert!(config.validate().is_err());
    }
}
