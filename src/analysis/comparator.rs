use serde::Serialize;
use std::cmp::Ordering;

use super::benchmark::{Metric, RankBenchmark};
use super::metrics::ProfileMetrics;
use crate::error::ComparisonError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GapDirection {
    Below,
    AtPar,
    Above,
}

/// How far a player sits from the current tier's benchmark on one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricGap {
    pub metric: Metric,
    pub player_value: f64,
    pub current_benchmark: f64,
    /// Reference only, never used for ordering.
    pub next_benchmark: f64,
    /// `current_benchmark - player_value`
    pub absolute_gap: f64,
    /// `absolute_gap` as a percentage of the current benchmark, 0 when the
    /// benchmark is 0.
    pub relative_gap: f64,
    pub direction: GapDirection,
}

impl MetricGap {
    fn new(metric: Metric, player_value: f64, current: f64, next: f64) -> Self {
        let absolute_gap = current - player_value;
        let relative_gap = if current == 0.0 {
            0.0
        } else {
            absolute_gap / current * 100.0
        };
        let direction = match absolute_gap.partial_cmp(&0.0) {
            Some(Ordering::Greater) => GapDirection::Below,
            Some(Ordering::Less) => GapDirection::Above,
            _ => GapDirection::AtPar,
        };

        MetricGap {
            metric,
            player_value,
            current_benchmark: current,
            next_benchmark: next,
            absolute_gap,
            relative_gap,
            direction,
        }
    }

    pub fn is_below(&self) -> bool {
        self.direction == GapDirection::Below
    }

    /// Distance to the next tier's value. Display only.
    pub fn gap_to_next(&self) -> f64 {
        self.next_benchmark - self.player_value
    }
}

pub struct RankComparator;

impl RankComparator {
    /// Gaps for every tracked metric, biggest relative shortfall first.
    ///
    /// Metrics where the player is below the current tier come first,
    /// ordered by descending relative gap with ties kept in [`Metric`]
    /// order. At-par and above metrics follow in [`Metric`] order.
    /// Fails if either benchmark lacks a tracked metric.
    pub fn compare(
        profile: &ProfileMetrics,
        current: &RankBenchmark,
        next: &RankBenchmark,
    ) -> Result<Vec<MetricGap>, ComparisonError> {
        let gaps = Metric::ALL
            .into_iter()
            .map(|metric| {
                Ok(MetricGap::new(
                    metric,
                    profile.value(metric),
                    current.value(metric)?,
                    next.value(metric)?,
                ))
            })
            .collect::<Result<Vec<_>, ComparisonError>>()?;

        let (mut below, rest): (Vec<_>, Vec<_>) = gaps.into_iter().partition(MetricGap::is_below);

        // stable: equal gaps keep declaration order
        below.sort_by(|a, b| b.relative_gap.total_cmp(&a.relative_gap));
        below.extend(rest);

        Ok(below)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rank::Tier;
    use std::collections::BTreeMap;

    fn benchmark(tier: Tier, values: [f64; 5]) -> RankBenchmark {
        let values: BTreeMap<Metric, f64> = Metric::ALL.into_iter().zip(values).collect();
        RankBenchmark::new(tier, values).unwrap()
    }

    fn profile(values: [f64; 5]) -> ProfileMetrics {
        ProfileMetrics {
            cs_per_min: values[0],
            kda: values[1],
            vision_per_min: values[2],
            gold_per_min: values[3],
            damage_per_min: values[4],
            win_rate: 50.0,
            sample_size: 20,
        }
    }

    fn order(gaps: &[MetricGap]) -> Vec<Metric> {
        gaps.iter().map(|g| g.metric).collect()
    }

    #[test]
    fn test_kda_ranked_before_cs() {
        let player = profile([5.0, 2.0, 1.0, 400.0, 600.0]);
        let gold = benchmark(Tier::Gold, [6.0, 3.0, 1.0, 400.0, 600.0]);
        let plat = benchmark(Tier::Platinum, [6.5, 3.2, 1.1, 410.0, 630.0]);

        let gaps = RankComparator::compare(&player, &gold, &plat).unwrap();

        assert_eq!(gaps[0].metric, Metric::Kda);
        assert_eq!(gaps[0].direction, GapDirection::Below);
        assert!((gaps[0].relative_gap - 100.0 / 3.0).abs() < 1e-9);
        assert!((gaps[0].absolute_gap - 1.0).abs() < 1e-9);

        assert_eq!(gaps[1].metric, Metric::CsPerMin);
        assert_eq!(gaps[1].direction, GapDirection::Below);
        assert!((gaps[1].relative_gap - 100.0 / 6.0).abs() < 1e-9);

        assert_eq!(gaps[2].metric, Metric::VisionPerMin);
        assert_eq!(gaps[2].direction, GapDirection::AtPar);
        assert_eq!(gaps[2].relative_gap, 0.0);
        assert!(gaps[2..].iter().all(|g| !g.is_below()));
    }

    #[test]
    fn test_next_tier_is_carried_through() {
        let player = profile([5.0, 2.0, 1.0, 400.0, 600.0]);
        let gold = benchmark(Tier::Gold, [6.0, 3.0, 1.0, 400.0, 600.0]);
        let far_ahead = benchmark(Tier::Platinum, [60.0, 30.0, 10.0, 4000.0, 6000.0]);
        let close = benchmark(Tier::Platinum, [6.1, 3.1, 1.1, 401.0, 601.0]);

        let a = RankComparator::compare(&player, &gold, &far_ahead).unwrap();
        let b = RankComparator::compare(&player, &gold, &close).unwrap();

        assert_eq!(order(&a), order(&b));
        assert_eq!(a[0].next_benchmark, 30.0);
        assert!((a[0].gap_to_next() - 28.0).abs() < 1e-9);
        assert_eq!(a[0].relative_gap, b[0].relative_gap);
    }

    #[test]
    fn test_above_metrics_follow_in_declaration_order() {
        let player = profile([8.0, 1.0, 2.0, 300.0, 900.0]);
        let gold = benchmark(Tier::Gold, [6.0, 3.0, 1.0, 400.0, 600.0]);

        let gaps = RankComparator::compare(&player, &gold, &gold).unwrap();

        assert_eq!(
            order(&gaps),
            vec![
                Metric::Kda,
                Metric::GoldPerMin,
                Metric::CsPerMin,
                Metric::VisionPerMin,
                Metric::DamagePerMin,
            ]
        );
        assert_eq!(gaps[2].direction, GapDirection::Above);
        assert!(gaps[2].relative_gap < 0.0);
    }

    #[test]
    fn test_ties_keep_declaration_order() {
        // every metric 50% below
        let player = profile([3.0, 1.5, 0.5, 200.0, 300.0]);
        let gold = benchmark(Tier::Gold, [6.0, 3.0, 1.0, 400.0, 600.0]);

        let first = RankComparator::compare(&player, &gold, &gold).unwrap();
        let second = RankComparator::compare(&player, &gold, &gold).unwrap();

        assert_eq!(order(&first), Metric::ALL.to_vec());
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_benchmark_has_zero_relative_gap() {
        let player = profile([5.0, 2.0, 1.0, 400.0, 600.0]);
        let odd = benchmark(Tier::Gold, [0.0, 3.0, 1.0, 400.0, 600.0]);

        let gaps = RankComparator::compare(&player, &odd, &odd).unwrap();
        let cs = gaps.iter().find(|g| g.metric == Metric::CsPerMin).unwrap();

        assert_eq!(cs.relative_gap, 0.0);
        assert_eq!(cs.direction, GapDirection::Above);
        assert!(gaps.iter().all(|g| g.relative_gap.is_finite()));
    }

    #[test]
    fn test_missing_metric_fails_whole_comparison() {
        let player = profile([5.0, 2.0, 1.0, 400.0, 600.0]);
        let gold = benchmark(Tier::Gold, [6.0, 3.0, 1.0, 400.0, 600.0]);
        let mut partial: BTreeMap<Metric, f64> = gold.values().clone();
        partial.remove(&Metric::VisionPerMin);
        let partial = RankBenchmark::new(Tier::Platinum, partial).unwrap();

        assert_eq!(
            RankComparator::compare(&player, &gold, &partial).unwrap_err(),
            ComparisonError::MissingMetric {
                tier: Tier::Platinum,
                metric: Metric::VisionPerMin
            }
        );
        assert!(RankComparator::compare(&player, &partial, &gold).is_err());
    }
}
