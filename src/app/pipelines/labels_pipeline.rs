use crate::core::output::deliver;
use crate::core::records::{decode_first_page, records_from_args};
use crate::core::{ConfigProvider, InputRecord, LoadOutcome, OutputArtifact, Pipeline, Storage};
use crate::core::{Result, TransformResult};
use crate::domain::model::OutputTarget;

/// Writes the first-page comment of each argument code to the output file,
/// one label per line with a trailing newline.
pub struct LabelsPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    codes: Vec<String>,
}

impl<S: Storage, C: ConfigProvider> LabelsPipeline<S, C> {
    pub fn new(storage: S, config: C, codes: Vec<String>) -> Self {
        Self {
            storage,
            config,
            codes,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for LabelsPipeline<S, C> {
    fn name(&self) -> &'static str {
        "labels"
    }

    async fn extract(&self) -> Result<Vec<InputRecord>> {
        Ok(records_from_args(&self.codes))
    }

    async fn transform(&self, records: Vec<InputRecord>) -> Result<TransformResult> {
        let labels = records
            .iter()
            .map(|record| decode_first_page(record).map(|page| page.comment.unwrap_or_default()))
            .collect::<Result<Vec<_>>>()?;

        Ok(TransformResult {
            page_count: labels.len(),
            artifact: OutputArtifact::Labels {
                labels,
                trailing_newline: true,
            },
        })
    }

    async fn load(&self, result: TransformResult) -> Result<LoadOutcome> {
        let target = OutputTarget::File(self.config.output_path().to_string());
        deliver(
            &self.storage,
            &target,
            result.artifact.render(),
            self.config.strict_write(),
        )
        .await
    }
}
