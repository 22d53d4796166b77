pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod fumen;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::LocalStorage;
pub use crate::app::pipelines::{
    CombineCommentsPipeline, CombinePipeline, FirstPagesPipeline, LabelsFilePipeline,
    LabelsPipeline,
};
pub use crate::config::ToolConfig;
pub use crate::core::etl::FumenEngine;
pub use crate::domain::model::{FumenCode, LoadOutcome, OutputTarget};
pub use crate::utils::error::{Result, ToolError};
