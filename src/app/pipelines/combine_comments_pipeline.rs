use crate::core::output::deliver;
use crate::core::records::{decode_first_page, encode_pages, parse_commented_lines};
use crate::core::{ConfigProvider, InputRecord, LoadOutcome, OutputArtifact, Pipeline, Storage};
use crate::core::{Result, TransformResult};
use crate::domain::model::OutputTarget;
use crate::fumen::Page;
use crate::utils::error::ToolError;

/// Reads `code,comment` lines and combines the first pages into one fumen,
/// each page carrying the comment from its line.
pub struct CombineCommentsPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    target: OutputTarget,
}

impl<S: Storage, C: ConfigProvider> CombineCommentsPipeline<S, C> {
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
impl<S: Storage, C: ConfigProvider> Pipeline for CombineCommentsPipeline<S, C> {
    fn name(&self) -> &'static str {
        "combine-comments"
    }

    async fn extract(&self) -> Result<Vec<InputRecord>> {
        let path = self.config.input_path();
        tracing::debug!("Reading commented codes from {}", path);
        let text = self.storage.read_file(path).await?;

        let records = parse_commented_lines(&text)?;
        if records.is_empty() {
            return Err(ToolError::EmptyInput {
                source_name: path.to_string(),
            });
        }
        Ok(records)
    }

    async fn transform(&self, records: Vec<InputRecord>) -> Result<TransformResult> {
        let mut pages = Vec::with_capacity(records.len());
        for record in records {
            let page = decode_first_page(&record)?;
            tracing::debug!(
                "{}: comment {:?}",
                record.origin,
                record.comment.as_deref().unwrap_or_default()
            );
            pages.push(Page::with_comment(page.field, record.comment));
        }

        let code = encode_pages(&pages)?;
        Ok(TransformResult {
            artifact: OutputArtifact::Link(format!("{}{}", self.config.viewer_url(), code)),
            page_count: pages.len(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::etl::FumenEngine;
    use crate::core::testing::{MockStorage, TestConfig};
    use crate::fumen::{self, Field};

    fn decoded_link(outcome: LoadOutcome) -> Vec<Page> {
        match outcome {
            LoadOutcome::Stdout(link) => {
                fumen::decode(link.strip_prefix("https://fumen.zui.jp/?").unwrap()).unwrap()
            }
            other => panic!("expected stdout output, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_comments_attach_to_pages_in_order() {
        let opener = fumen::encode(&[Page::new(Field::from_rows(&["ZZ_____III"]).unwrap())]).unwrap();
        let tki = fumen::encode(&[Page::new(Field::from_rows(&["T_________"]).unwrap())]).unwrap();
        let input = format!("{},jstris opener\n{},TKI setup\n", opener, tki);
        let storage = MockStorage::with_file("input.csv", &input);

        let pipeline = CombineCommentsPipeline::new(storage, TestConfig::default());
        let pages = decoded_link(FumenEngine::new(pipeline).run().await.unwrap());

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].comment_text(), "jstris opener");
        assert_eq!(pages[1].comment_text(), "TKI setup");
        assert_eq!(pages[1].field, Field::from_rows(&["T_________"]).unwrap());
    }

    #[tokio::test]
    async fn test_blank_lines_add_no_pages_and_commas_survive() {
        let input = "\nv115@vhAAgH,PCO, then DPC\n   \nv115@vhAAgH,second\n\n";
        let storage = MockStorage::with_file("input.csv", input);

        let pipeline = CombineCommentsPipeline::new(storage, TestConfig::default());
        let pages = decoded_link(FumenEngine::new(pipeline).run().await.unwrap());

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].comment_text(), "PCO, then DPC");
        assert_eq!(pages[1].comment_text(), "second");
    }

    #[tokio::test]
    async fn test_quoted_comments_are_kept_verbatim() {
        let input = "v115@vhAAgH,\"PCO\" variant\nv115@vhAAgH,\"open\nv115@vhAAgH,TKI\n";
        let storage = MockStorage::with_file("input.csv", input);

        let pipeline = CombineCommentsPipeline::new(storage, TestConfig::default());
        let pages = decoded_link(FumenEngine::new(pipeline).run().await.unwrap());

        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].comment_text(), "\"PCO\" variant");
        assert_eq!(pages[1].comment_text(), "\"open");
        assert_eq!(pages[2].comment_text(), "TKI");
    }

    #[tokio::test]
    async fn test_empty_input_file_is_an_error() {
        let storage = MockStorage::with_file("input.csv", "\n  \n");
        let pipeline = CombineCommentsPipeline::new(storage, TestConfig::default());

        let error = FumenEngine::new(pipeline).run().await.unwrap_err();
        assert!(matches!(error, ToolError::EmptyInput { .. }));
    }

    #[tokio::test]
    async fn test_missing_input_file_is_an_error() {
        let pipeline = CombineCommentsPipeline::new(MockStorage::default(), TestConfig::default());
        let error = FumenEngine::new(pipeline).run().await.unwrap_err();
        assert!(matches!(error, ToolError::IoError(_)));
    }

    #[tokio::test]
    async fn test_output_can_target_a_file() {
        let storage = MockStorage::with_file("input.csv", "v115@vhAAgH,only\n");
        let pipeline = CombineCommentsPipeline::new(storage.clone(), TestConfig::default())
            .with_target(OutputTarget::File("combined.txt".to_string()));

        let outcome = FumenEngine::new(pipeline).run().await.unwrap();
        assert_eq!(outcome, LoadOutcome::Written("combined.txt".to_string()));
        assert!(storage
            .get_file("combined.txt")
            .unwrap()
            .starts_with("https://fumen.zui.jp/?v115@"));
    }
}
