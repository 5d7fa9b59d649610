//! # coach_diff
//!
//! Turns a player's recent ranked matches into a performance profile and
//! shows where it falls short of the benchmarks for their tier.
//!
//! ## Architecture
//!
//! - **domain**: validated value objects (match records, matches, rank entries)
//! - **analysis**: metrics calculator, benchmark table, rank comparator
//! - **api**: Riot Games API client and DTOs
//! - **cache**: on-disk match cache
//! - **config**: environment configuration
//! - **display**: terminal rendering

pub mod analysis;
pub mod api;
pub mod cache;
pub mod config;
pub mod display;
pub mod domain;
pub mod error;

pub use analysis::{
    BenchmarkTable, GapDirection, Metric, MetricGap, MetricsCalculator, ProfileMetrics,
    RankBenchmark, RankComparator,
};
pub use domain::{Match, MatchRecord, MatchRecordData, RankEntry, Tier};
pub use error::{AppError, ComparisonError, LookupError, ValidationError};
