pub mod center;
pub mod error;
pub mod evaluate;
pub mod format;
pub mod metricdata;
pub mod partition;
pub mod reduce;

pub use center::{available_workers, compute_metric_center, MetricCenter};
pub use error::{Error, Result};
pub use metricdata::{Point, PointSet};
pub use partition::PartitionStrategy;
pub use reduce::FinalResult;
