use crate::core::output::deliver;
use crate::core::records::{decode_first_page, encode_pages, parse_code_lines};
use crate::core::{ConfigProvider, InputRecord, LoadOutcome, OutputArtifact, Pipeline, Storage};
use crate::core::{Result, TransformResult};
use crate::domain::model::OutputTarget;
use crate::fumen::Page;

/// Re-encodes the first page of each input code as its own one-page fumen.
pub struct FirstPagesPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    target: OutputTarget,
}

impl<S: Storage, C: ConfigProvider> FirstPagesPipeline<S, C> {
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
impl<S: Storage, C: ConfigProvider> Pipeline for FirstPagesPipeline<S, C> {
    fn name(&self) -> &'static str {
        "first-pages"
    }

    async fn extract(&self) -> Result<Vec<InputRecord>> {
        let text = self.storage.read_file(self.config.input_path()).await?;
        Ok(parse_code_lines(&text))
    }

    async fn transform(&self, records: Vec<InputRecord>) -> Result<TransformResult> {
        let mut codes = Vec::with_capacity(records.len());
        for record in &records {
            let page = decode_first_page(record)?;
            let single = Page::with_comment(page.field, page.comment);
            codes.push(encode_pages(std::slice::from_ref(&single))?);
        }

        Ok(TransformResult {
            page_count: codes.len(),
            artifact: OutputArtifact::Codes(codes),
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
