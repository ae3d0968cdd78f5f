use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRunSummary {
    pub output_path: String,
    pub jobs: usize,
    pub failed: usize,
}

pub struct BatchEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> BatchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<BatchRunSummary> {
        let started = Instant::now();
        tracing::info!("Starting batch run...");

        tracing::info!("Resolving jobs...");
        let jobs = self.pipeline.extract().await?;
        tracing::info!("Resolved {} jobs", jobs.len());

        tracing::info!("Running jobs...");
        let result = self.pipeline.transform(jobs).await?;
        let total = result.outcomes.len();
        let failed = result.failed_count();
        if failed > 0 {
            tracing::warn!("{} of {} jobs failed", failed, total);
        } else {
            tracing::info!("All {} jobs succeeded", total);
        }

        tracing::info!("Writing outputs...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {} ({:?})", output_path, started.elapsed());

        Ok(BatchRunSummary {
            output_path,
            jobs: total,
            failed,
        })
    }
}
