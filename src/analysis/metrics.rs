use serde::Serialize;

use super::benchmark::Metric;
use crate::domain::game::Match;
use crate::domain::match_record::MatchRecord;

/// Averages over a window of one player's matches.
///
/// `sample_size == 0` means no match was eligible and every rate is 0;
/// check [`ProfileMetrics::has_data`] before trusting the rates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileMetrics {
    pub cs_per_min: f64,
    pub kda: f64,
    pub vision_per_min: f64,
    pub gold_per_min: f64,
    pub damage_per_min: f64,
    /// Percentage of wins in the sample.
    pub win_rate: f64,
    pub sample_size: usize,
}

impl ProfileMetrics {
    pub fn empty() -> Self {
        ProfileMetrics {
            cs_per_min: 0.0,
            kda: 0.0,
            vision_per_min: 0.0,
            gold_per_min: 0.0,
            damage_per_min: 0.0,
            win_rate: 0.0,
            sample_size: 0,
        }
    }

    pub fn has_data(&self) -> bool {
        self.sample_size > 0
    }

    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::CsPerMin => self.cs_per_min,
            Metric::Kda => self.kda,
            Metric::VisionPerMin => self.vision_per_min,
            Metric::GoldPerMin => self.gold_per_min,
            Metric::DamagePerMin => self.damage_per_min,
        }
    }
}

#[derive(Default)]
struct RateSamples {
    cs_per_min: Vec<f64>,
    kda: Vec<f64>,
    vision_per_min: Vec<f64>,
    gold_per_min: Vec<f64>,
    damage_per_min: Vec<f64>,
    wins: usize,
}

impl RateSamples {
    fn add(&mut self, record: &MatchRecord) {
        self.cs_per_min.push(record.cs_per_min());
        self.kda.push(record.kda());
        self.vision_per_min.push(record.vision_per_min());
        self.gold_per_min.push(record.gold_per_min());
        self.damage_per_min.push(record.damage_per_min());
        if record.win() {
            self.wins += 1;
        }
    }

    fn finish(self) -> ProfileMetrics {
        let n = self.kda.len();
        if n == 0 {
            return ProfileMetrics::empty();
        }

        ProfileMetrics {
            cs_per_min: mean(self.cs_per_min),
            kda: mean(self.kda),
            vision_per_min: mean(self.vision_per_min),
            gold_per_min: mean(self.gold_per_min),
            damage_per_min: mean(self.damage_per_min),
            win_rate: self.wins as f64 * 100.0 / n as f64,
            sample_size: n,
        }
    }
}

/// Summed in sorted order so the result does not depend on input order.
fn mean(mut values: Vec<f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(f64::total_cmp);
    values.iter().sum::<f64>() / values.len() as f64
}

pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Aggregates `player_id`'s performance across `matches`.
    ///
    /// Matches the player did not take part in are skipped. Queue filtering
    /// is the caller's job.
    pub fn calculate(matches: &[Match], player_id: &str) -> ProfileMetrics {
        let records: Vec<&MatchRecord> = matches
            .iter()
            .filter_map(|m| m.find_participant(player_id).ok())
            .collect();

        Self::from_records(records)
    }

    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a MatchRecord>) -> ProfileMetrics {
        let mut samples = RateSamples::default();
        for record in records {
            samples.add(record);
        }
        samples.finish()
    }
}
