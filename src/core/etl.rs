use crate::core::Pipeline;
use crate::domain::model::LoadOutcome;
use crate::utils::error::Result;

/// Runs a pipeline's extract, transform and load stages in order.
pub struct FumenEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> FumenEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<LoadOutcome> {
        let name = self.pipeline.name();
        tracing::info!("Starting {} pipeline", name);

        let records = self.pipeline.extract().await?;
        tracing::info!("Read {} fumen records", records.len());

        let result = self.pipeline.transform(records).await?;
        tracing::info!("Processed {} pages", result.page_count);

        let outcome = self.pipeline.load(result).await?;
        match &outcome {
            LoadOutcome::Written(path) => tracing::info!("Output saved to: {}", path),
            LoadOutcome::Stdout(_) => tracing::debug!("Output ready for stdout"),
            LoadOutcome::WriteFailed { path, .. } => {
                tracing::warn!("{} finished without writing {}", name, path)
            }
        }

        Ok(outcome)
    }
}
