use thiserror::Error;

pub type IdscanResult<T> = Result<T, IdscanError>;

#[derive(Error, Debug)]
pub enum IdscanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML config error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Column '{column}' not found (available: {})", .available.join(", "))]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Pattern error: {0}")]
    Pattern(String),
}

impl IdscanError {
    /// True for errors caused by the run configuration rather than I/O
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            IdscanError::MissingColumn { .. } | IdscanError::Config(_) | IdscanError::Yaml(_)
        )
    }
}
