use serde::{Deserialize, Serialize};
use std::fmt;

/// An encoded fumen sequence, kept as the user supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FumenCode(String);

impl FumenCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FumenCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOrigin {
    /// 1-based position among the command-line codes.
    Argument(usize),
    /// 1-based line in the input file.
    Line(usize),
}

impl fmt::Display for RecordOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordOrigin::Argument(index) => write!(f, "argument {}", index),
            RecordOrigin::Line(line) => write!(f, "line {}", line),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRecord {
    pub origin: RecordOrigin,
    pub code: FumenCode,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputArtifact {
    /// Combined code behind the viewer URL.
    Link(String),
    Labels {
        labels: Vec<String>,
        trailing_newline: bool,
    },
    Codes(Vec<FumenCode>),
}

impl OutputArtifact {
    pub fn render(&self) -> String {
        match self {
            OutputArtifact::Link(link) => link.clone(),
            OutputArtifact::Labels {
                labels,
                trailing_newline: true,
            } => labels.iter().map(|label| format!("{}\n", label)).collect(),
            OutputArtifact::Labels {
                labels,
                trailing_newline: false,
            } => labels.join("\n"),
            OutputArtifact::Codes(codes) => codes
                .iter()
                .map(FumenCode::as_str)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub artifact: OutputArtifact,
    pub page_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    File(String),
    Stdout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Written(String),
    /// Text the caller should print.
    Stdout(String),
    /// The write failed and was logged instead of aborting the run.
    WriteFailed { path: String, reason: String },
}
