pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_url, Validate};
use toml_config::FileConfig;

#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "fumen-tools")]
#[command(about = "Combine, split and label Tetris fumen codes")]
pub struct CliConfig {
    /// Path to the TOML configuration file
    #[arg(long, global = true, default_value = toml_config::DEFAULT_CONFIG_FILE)]
    pub config: String,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Treat a failed output write as an error instead of logging it
    #[arg(long, global = true)]
    pub strict_write: bool,

    /// Viewer URL prefixed to combined codes
    #[arg(long, global = true)]
    pub viewer_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Merge the first page of each code into one fumen link (written to the output file)
    Combine {
        #[arg(required = true)]
        codes: Vec<String>,
        #[arg(long)]
        output: Option<String>,
    },
    /// Merge `code,comment` lines from the input file into one commented fumen link
    CombineComments(FileArgs),
    /// Write the first-page comment of each code to the output file
    Labels {
        #[arg(required = true)]
        codes: Vec<String>,
        #[arg(long)]
        output: Option<String>,
    },
    /// Print the first-page comment of each code in the input file
    LabelsFile(FileArgs),
    /// Print each input code's first page as a standalone fumen
    FirstPages(FileArgs),
    /// Show the pages of a fumen code
    Inspect {
        code: String,
        #[arg(long)]
        json: bool,
    },
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct FileArgs {
    #[arg(long)]
    pub input: Option<String>,
    /// Write to this file instead of stdout
    #[arg(long)]
    pub output: Option<String>,
}

/// Effective settings: config file values with command-line overrides applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    pub input_path: String,
    pub output_path: String,
    pub viewer_url: String,
    pub strict_write: bool,
}

impl From<FileConfig> for ToolConfig {
    fn from(file: FileConfig) -> Self {
        Self {
            input_path: file.paths.input,
            output_path: file.paths.output,
            viewer_url: file.viewer.url,
            strict_write: file.output.strict_write,
        }
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        FileConfig::default().into()
    }
}

impl ToolConfig {
    pub fn with_input(mut self, input: Option<String>) -> Self {
        if let Some(path) = input {
            self.input_path = path;
        }
        self
    }

    pub fn with_output(mut self, output: Option<String>) -> Self {
        if let Some(path) = output {
            self.output_path = path;
        }
        self
    }

    pub fn with_viewer_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.viewer_url = url;
        }
        self
    }

    pub fn with_strict_write(mut self, strict: bool) -> Self {
        self.strict_write |= strict;
        self
    }
}

impl Validate for ToolConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input_path)?;
        validate_path("output", &self.output_path)?;
        validate_url("viewer_url", &self.viewer_url)?;
        Ok(())
    }
}

impl ConfigProvider for ToolConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn viewer_url(&self) -> &str {
        &self.viewer_url
    }

    fn strict_write(&self) -> bool {
        self.strict_write
    }
}
