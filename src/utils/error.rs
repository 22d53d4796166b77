use crate::fumen::FumenError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Could not decode fumen on {location}: {source}")]
    DecodeError {
        location: String,
        code: String,
        #[source]
        source: FumenError,
    },

    #[error("Fumen encoding failed: {0}")]
    EncodeError(#[source] FumenError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to write {path}: {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration file error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("No fumen codes found in {source_name}")]
    EmptyInput { source_name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    System,
}

impl ToolError {
    pub fn decode(location: impl Into<String>, code: &str, source: FumenError) -> Self {
        ToolError::DecodeError {
            location: location.into(),
            code: code.to_string(),
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ToolError::DecodeError { .. }
            | ToolError::EncodeError(_)
            | ToolError::CsvError(_)
            | ToolError::EmptyInput { .. } => ErrorCategory::Input,
            ToolError::TomlError(_) | ToolError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            ToolError::IoError(_)
            | ToolError::WriteError { .. }
            | ToolError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Input => 1,
            ErrorCategory::Configuration => 2,
            ErrorCategory::System => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ToolError::DecodeError { .. } => {
                "Check that the code starts with v115@ and was copied completely"
            }
            ToolError::EmptyInput { .. } => "Add at least one fumen code to the input",
            ToolError::CsvError(_) => "Each input line should look like `code,comment`",
            ToolError::IoError(_) => "Check that the input file exists and is readable",
            ToolError::WriteError { .. } => "Check that the output directory is writable",
            ToolError::TomlError(_) => {
                "Fix the configuration file or pass --config with a valid path"
            }
            ToolError::InvalidConfigValueError { .. } => "Correct the reported setting",
            ToolError::EncodeError(_) | ToolError::SerializationError(_) => {
                "Re-run with --verbose and report the input that caused this"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ToolError>;
