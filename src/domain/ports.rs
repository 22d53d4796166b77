use crate::domain::model::{InputRecord, LoadOutcome, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<String>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &str,
    ) -> impl std::future::Future<Output = std::io::Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn viewer_url(&self) -> &str;
    fn strict_write(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    fn name(&self) -> &'static str;
    async fn extract(&self) -> Result<Vec<InputRecord>>;
    async fn transform(&self, records: Vec<InputRecord>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<LoadOutcome>;
}
