pub mod category;
pub mod classify;
pub mod model;
pub mod partition;

pub use category::CoverageCategory;
pub use classify::classify;
pub use model::{Issue, SprintCoverageResult, SprintInfo};
pub use partition::{buckets, partition, Bucket, ChartEntry};
