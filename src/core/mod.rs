pub mod batch;
pub mod case_transform;
pub mod date_diff;
pub mod pipeline;
pub mod text_stats;

pub use crate::domain::model::{BatchResult, Job, JobKind};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
