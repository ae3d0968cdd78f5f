pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{BatchConfig, LocalStorage};

pub use crate::core::batch::{BatchEngine, BatchRunSummary};
pub use crate::core::case_transform::{convert, transform, transform_named};
pub use crate::core::date_diff::compute_difference;
pub use crate::core::pipeline::BatchPipeline;
pub use crate::core::text_stats::text_stats;
pub use crate::domain::model::{
    CaseMode, CaseOptions, CaseTransformResult, DateDifference, TextStats,
};
pub use crate::utils::error::{Result, ToolError};
