use crate::domain::model::{BatchResult, CaseOptions, Job, JobSpec};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn job_specs(&self) -> &[JobSpec];
    fn case_defaults(&self) -> CaseOptions;
    /// Unknown case modes run as the identity transform instead of failing.
    fn lenient_modes(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Job>>;
    async fn transform(&self, jobs: Vec<Job>) -> Result<BatchResult>;
    async fn load(&self, result: BatchResult) -> Result<String>;
}
