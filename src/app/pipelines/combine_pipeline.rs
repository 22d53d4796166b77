use crate::core::output::deliver;
use crate::core::records::{decode_first_page, encode_pages, records_from_args};
use crate::core::{ConfigProvider, InputRecord, LoadOutcome, OutputArtifact, Pipeline, Storage};
use crate::core::{Result, TransformResult};
use crate::domain::model::OutputTarget;
use crate::fumen::Page;
use crate::utils::error::ToolError;

/// Merges the first page of every argument code into one multi-page fumen
/// and writes its viewer link to the output file. Comments are dropped.
pub struct CombinePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    codes: Vec<String>,
}

impl<S: Storage, C: ConfigProvider> CombinePipeline<S, C> {
    pub fn new(storage: S, config: C, codes: Vec<String>) -> Self {
        Self {
            storage,
            config,
            codes,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CombinePipeline<S, C> {
    fn name(&self) -> &'static str {
        "combine"
    }

    async fn extract(&self) -> Result<Vec<InputRecord>> {
        let records = records_from_args(&self.codes);
        if records.is_empty() {
            return Err(ToolError::EmptyInput {
                source_name: "command-line arguments".to_string(),
            });
        }
        Ok(records)
    }

    async fn transform(&self, records: Vec<InputRecord>) -> Result<TransformResult> {
        let mut pages = Vec::with_capacity(records.len());
        for record in &records {
            let page = decode_first_page(record)?;
            tracing::debug!("Taking field from {}", record.origin);
            pages.push(Page::new(page.field));
        }

        let code = encode_pages(&pages)?;
        Ok(TransformResult {
            artifact: OutputArtifact::Link(format!("{}{}", self.config.viewer_url(), code)),
            page_count: pages.len(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::etl::FumenEngine;
    use crate::core::testing::{MockStorage, TestConfig};
    use crate::fumen::{self, Field};

    fn code_with(rows: &[&str], comment: &str) -> String {
        let page = Page::with_comment(Field::from_rows(rows).unwrap(), Some(comment.to_string()));
        fumen::encode(&[page]).unwrap()
    }

    #[tokio::test]
    async fn test_combine_writes_viewer_link() {
        let first = code_with(&["XXXXXXXX__"], "dropped");
        let second = code_with(&["T_________", "TT________", "T_________"], "also dropped");
        let storage = MockStorage::default();
        let pipeline = CombinePipeline::new(
            storage.clone(),
            TestConfig::default(),
            vec![first, second],
        );

        let outcome = FumenEngine::new(pipeline).run().await.unwrap();
        assert_eq!(outcome, LoadOutcome::Written("output.txt".to_string()));

        let link = storage.get_file("output.txt").unwrap();
        let code = link.strip_prefix("https://fumen.zui.jp/?").unwrap();
        let pages = fumen::decode(code).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].field, Field::from_rows(&["XXXXXXXX__"]).unwrap());
        assert_eq!(
            pages[1].field,
            Field::from_rows(&["T_________", "TT________", "T_________"]).unwrap()
        );
        assert!(pages.iter().all(|page| page.comment_text().is_empty()));
        assert!(!link.ends_with('\n'));
    }

    #[tokio::test]
    async fn test_bad_code_aborts_before_writing() {
        let storage = MockStorage::default();
        let pipeline = CombinePipeline::new(
            storage.clone(),
            TestConfig::default(),
            vec!["v115@vhAAgH".to_string(), "v115@broken!".to_string()],
        );

        let error = FumenEngine::new(pipeline).run().await.unwrap_err();
        assert!(matches!(error, ToolError::DecodeError { .. }));
        assert!(storage.get_file("output.txt").is_none());
    }

    #[tokio::test]
    async fn test_write_failure_is_logged_not_raised() {
        let pipeline = CombinePipeline::new(
            MockStorage::failing_writes(),
            TestConfig::default(),
            vec!["v115@vhAAgH".to_string()],
        );

        let outcome = FumenEngine::new(pipeline).run().await.unwrap();
        assert!(matches!(outcome, LoadOutcome::WriteFailed { .. }));
    }

    #[tokio::test]
    async fn test_strict_write_surfaces_failure() {
        let config = TestConfig {
            strict_write: true,
            ..TestConfig::default()
        };
        let pipeline = CombinePipeline::new(
            MockStorage::failing_writes(),
            config,
            vec!["v115@vhAAgH".to_string()],
        );

        let error = FumenEngine::new(pipeline).run().await.unwrap_err();
        assert!(matches!(error, ToolError::WriteError { .. }));
    }
}
