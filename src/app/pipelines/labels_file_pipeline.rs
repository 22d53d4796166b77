use crate::core::output::deliver;
use crate::core::records::{decode_first_page, parse_code_lines};
use crate::core::{ConfigProvider, InputRecord, LoadOutcome, OutputArtifact, Pipeline, Storage};
use crate::core::{Result, TransformResult};
use crate::domain::model::OutputTarget;

/// Prints the first-page comment of each code in the input file.
pub struct LabelsFilePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    target: OutputTarget,
}

impl<S: Storage, C: ConfigProvider> LabelsFilePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            target: OutputTarget::Stdout,
        }
    }

    pub fn with_target(mut self, target: OutputTarget) -> Self {
        self.target = target;
        self
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for LabelsFilePipeline<S, C> {
    fn name(&self) -> &'static str {
        "labels-file"
    }

    async fn extract(&self) -> Result<Vec<InputRecord>> {
        let text = self.storage.read_file(self.config.input_path()).await?;
        Ok(parse_code_lines(&text))
    }

    async fn transform(&self, records: Vec<InputRecord>) -> Result<TransformResult> {
        let mut labels = Vec::with_capacity(records.len());
        for record in &records {
            let page = decode_first_page(record)?;
            labels.push(page.comment.unwrap_or_default());
        }

        Ok(TransformResult {
            page_count: labels.len(),
            artifact: OutputArtifact::Labels {
                labels,
                trailing_newline: false,
            },
        })
    }

    async fn load(&self, result: TransformResult) -> Result<LoadOutcome> {
        deliver(
            &self.storage,
            &self.target,
            result.artifact.render(),
            self.config.strict_write(),
        )
        .await
    }
}
