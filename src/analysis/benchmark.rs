use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::domain::rank::Tier;
use crate::error::{AppError, ComparisonError};

const BUNDLED_BENCHMARKS: &str = include_str!("../../data/benchmarks.json");

/// A tracked performance metric. Declaration order breaks ranking ties.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    CsPerMin,
    Kda,
    VisionPerMin,
    GoldPerMin,
    DamagePerMin,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::CsPerMin,
        Metric::Kda,
        Metric::VisionPerMin,
        Metric::GoldPerMin,
        Metric::DamagePerMin,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Metric::CsPerMin => "CS/min",
            Metric::Kda => "KDA",
            Metric::VisionPerMin => "Vision/min",
            Metric::GoldPerMin => "Gold/min",
            Metric::DamagePerMin => "Damage/min",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Typical values of every tracked metric for players of one tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankBenchmark {
    tier: Tier,
    values: BTreeMap<Metric, f64>,
}

impl RankBenchmark {
    /// Rejects negative and non-finite values. Missing metrics are allowed
    /// here and only fail the comparison that needs them.
    pub fn new(tier: Tier, values: BTreeMap<Metric, f64>) -> Result<Self, ComparisonError> {
        if let Some((&metric, &value)) = values
            .iter()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(ComparisonError::InvalidBenchmark {
                tier,
                metric,
                value,
            });
        }
        Ok(RankBenchmark { tier, values })
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn value(&self, metric: Metric) -> Result<f64, ComparisonError> {
        self.values
            .get(&metric)
            .copied()
            .ok_or(ComparisonError::MissingMetric {
                tier: self.tier,
                metric,
            })
    }

    pub fn values(&self) -> &BTreeMap<Metric, f64> {
        &self.values
    }
}

/// Benchmarks for the whole ladder, keyed by tier.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkTable {
    benchmarks: BTreeMap<Tier, RankBenchmark>,
}

impl BenchmarkTable {
    pub fn new(benchmarks: impl IntoIterator<Item = RankBenchmark>) -> Self {
        BenchmarkTable {
            benchmarks: benchmarks.into_iter().map(|b| (b.tier(), b)).collect(),
        }
    }

    /// Parses `{ "GOLD": { "cs_per_min": 6.1, ... }, ... }`.
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let raw: BTreeMap<Tier, BTreeMap<Metric, f64>> = serde_json::from_str(json)
            .map_err(|e| AppError::JsonError(format!("Failed to parse benchmarks: {}", e)))?;

        let benchmarks = raw
            .into_iter()
            .map(|(tier, values)| RankBenchmark::new(tier, values))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(benchmarks))
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// The reference table shipped with the tool.
    pub fn bundled() -> Result<Self, AppError> {
        Self::from_json(BUNDLED_BENCHMARKS)
    }

    pub fn get(&self, tier: Tier) -> Option<&RankBenchmark> {
        self.benchmarks.get(&tier)
    }

    /// Benchmarks for `tier` and the tier above it. CHALLENGER has nothing
    /// above, so it is paired with itself.
    pub fn pair_for(&self, tier: Tier) -> Result<(&RankBenchmark, &RankBenchmark), ComparisonError> {
        let current = self
            .get(tier)
            .ok_or(ComparisonError::MissingTier(tier))?;
        let next_tier = tier.next().unwrap_or(tier);
        let next = self
            .get(next_tier)
            .ok_or(ComparisonError::MissingTier(next_tier))?;
        Ok((current, next))
    }

    pub fn len(&self) -> usize {
        self.benchmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }
}
