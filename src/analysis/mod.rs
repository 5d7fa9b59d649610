//! Profile aggregation and rank benchmark comparison.

pub mod benchmark;
pub mod comparator;
pub mod metrics;

pub use benchmark::{BenchmarkTable, Metric, RankBenchmark};
pub use comparator::{GapDirection, MetricGap, RankComparator};
pub use metrics::{MetricsCalculator, ProfileMetrics};
